use std::io::{BufReader, Cursor};

use crate::data_structures::mesh::TriMesh;

/**
 * This module contains all logic for loading meshes from external files and
 * uploading them to the GPU.
 */
pub mod mesh;

#[cfg(target_arch = "wasm32")]
fn format_url(file_name: &str) -> anyhow::Result<reqwest::Url> {
    let window = web_sys::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let origin = window
        .location()
        .origin()
        .map_err(|_| anyhow::anyhow!("window has no origin"))?;
    let base = reqwest::Url::parse(&format!("{}/assets/", origin))?;
    Ok(base.join(file_name)?)
}

pub async fn load_string(file_name: &str) -> anyhow::Result<String> {
    #[cfg(target_arch = "wasm32")]
    let txt = {
        let url = format_url(file_name)?;
        reqwest::get(url).await?.text().await?
    };
    #[cfg(not(target_arch = "wasm32"))]
    let txt = {
        let path = std::path::Path::new("./")
            .join("assets")
            .join(file_name);
        std::fs::read_to_string(path)?
    };

    Ok(txt)
}

/// Parse OBJ text into a single mesh.
///
/// All objects in the file are merged. Polygons are triangulated and every
/// vertex gets a single index; materials are ignored.
pub async fn parse_obj(name: &str, obj_text: &str) -> anyhow::Result<TriMesh> {
    let mut obj_reader = BufReader::new(Cursor::new(obj_text));

    let (models, _) = tobj::load_obj_buf_async(
        &mut obj_reader,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
        |p| async move {
            log::info!("Skipping material library {p}, materials are not used for solids.");
            Err(tobj::LoadError::OpenFileFailed)
        },
    )
    .await?;

    let mesh = mesh::flatten_models(&models)?.with_name(name);
    log::info!(
        "Loaded {} ({} objects, {} vertices, {} triangles).",
        name,
        models.len(),
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    Ok(mesh)
}

/// Load an OBJ file from the assets directory.
pub async fn load_mesh_obj(file_name: &str) -> anyhow::Result<TriMesh> {
    let obj_text = load_string(file_name).await?;
    parse_obj(file_name, &obj_text).await
}
