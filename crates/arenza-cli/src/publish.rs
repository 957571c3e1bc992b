//! The panel flow: pick sizes, upload images per size, publish the product.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use arenza_core::{PanelSize, PanelState, ProductDraft};
use arenza_store::{upload_batch, Storefront, UploadFile};

use crate::context::{sign_in_admin, Credentials};

/// One `--size LABEL=path[,path...]` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeFiles {
    pub size: PanelSize,
    pub files: Vec<PathBuf>,
}

pub(crate) fn parse_size_files(raw: &str) -> Result<SizeFiles, String> {
    let (label, paths) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected LABEL=path[,path...], got \"{raw}\""))?;
    let size: PanelSize = label.parse::<PanelSize>().map_err(|e| e.to_string())?;
    let files: Vec<PathBuf> = paths
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
        .collect();
    if files.is_empty() {
        return Err(format!("no image files given for size {size}"));
    }
    Ok(SizeFiles { size, files })
}

#[derive(Debug)]
pub(crate) struct PublishRequest {
    pub name: String,
    pub price: String,
    pub description: String,
    pub model_url: String,
    pub sizes: Vec<SizeFiles>,
}

/// A publish whose draft has been validated and whose files are all in
/// memory. Nothing can fail locally after this point, so no upload is left
/// without a product because of bad input.
#[derive(Debug)]
pub(crate) struct PreparedPublish {
    draft: ProductDraft,
    batches: Vec<(PanelSize, Vec<UploadFile>)>,
}

/// Validates the product fields and reads every image file.
///
/// # Errors
///
/// Fails on an invalid name or price, or on the first unreadable file,
/// before any network call.
pub(crate) async fn prepare(request: PublishRequest) -> anyhow::Result<PreparedPublish> {
    let draft = ProductDraft {
        name: request.name,
        price: request.price,
        description: request.description,
        image: request.model_url,
        variants: Vec::new(),
    };
    draft.validate()?;

    let mut batches = Vec::with_capacity(request.sizes.len());
    for entry in request.sizes {
        let mut files = Vec::with_capacity(entry.files.len());
        for path in &entry.files {
            files.push(read_upload(path).await?);
        }
        batches.push((entry.size, files));
    }
    Ok(PreparedPublish { draft, batches })
}

pub(crate) async fn run(
    store: &mut Storefront,
    credentials: &Credentials,
    prepared: PreparedPublish,
) -> anyhow::Result<()> {
    let PreparedPublish { mut draft, batches } = prepared;
    sign_in_admin(store, credentials).await?;

    let mut panel = PanelState::new();
    for (size, files) in batches {
        if !panel.is_active(size) {
            panel.toggle(size);
        }
        let report = upload_batch(store.client(), &mut panel, &draft.name, size, files).await?;
        println!("{size}: uploaded {} image(s)", report.uploaded.len());
        for failure in &report.failed {
            eprintln!(
                "{size}: failed to upload \"{}\": {}",
                failure.file_name, failure.error
            );
        }
    }

    draft.variants = panel.materialize();
    store.create(&draft).await?;
    println!(
        "product \"{}\" published with {} size(s)",
        draft.name.trim(),
        draft.variants.len()
    );
    panel.reset();
    Ok(())
}

async fn read_upload(path: &Path) -> anyhow::Result<UploadFile> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow::anyhow!("invalid file name: {}", path.display()))?
        .to_owned();
    Ok(UploadFile {
        content_type: content_type_for(path).map(str::to_owned),
        name,
        bytes,
    })
}

fn content_type_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        "avif" => Some("image/avif"),
        _ => None,
    }
}
