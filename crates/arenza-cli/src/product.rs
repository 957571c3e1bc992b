//! Admin product commands: add, edit, delete and variant inspection.

use std::path::PathBuf;

use anyhow::Context as _;
use arenza_core::{encode_variant_text, ProductDraft, ProductId, Variant, VariantSource};
use arenza_store::Storefront;
use clap::{Args, Subcommand};

use crate::context::{sign_in_admin, Credentials};

/// Sub-commands available under `product`.
#[derive(Debug, Subcommand)]
pub enum ProductCommands {
    /// Create a product
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        image: String,
        #[command(flatten)]
        variants: VariantInput,
    },
    /// Edit a product; omitted fields keep their stored values
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        price: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        image: Option<String>,
        #[command(flatten)]
        variants: VariantInput,
    },
    /// Delete a product
    Delete { id: String },
    /// Print a product's variants as `Size: Print 1, Print 2` lines
    Variants { id: String },
}

/// Variant list in the text format, inline or from a file.
#[derive(Debug, Args)]
pub struct VariantInput {
    /// Lines of `Size: Print 1, Print 2`
    #[arg(long = "variants", conflicts_with = "variants_file")]
    text: Option<String>,
    /// File holding the same text format
    #[arg(long)]
    variants_file: Option<PathBuf>,
}

impl VariantInput {
    /// `None` when neither flag was given.
    fn decode(&self) -> anyhow::Result<Option<Vec<Variant>>> {
        let text = match (&self.text, &self.variants_file) {
            (Some(text), _) => text.clone(),
            (None, Some(path)) => std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?,
            (None, None) => return Ok(None),
        };
        Ok(Some(VariantSource::Textarea(&text).decode()?))
    }
}

/// Partial edit: `None` keeps the stored value.
#[derive(Debug, Default)]
pub(crate) struct ProductEdit {
    pub name: Option<String>,
    pub price: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub variants: Option<Vec<Variant>>,
}

/// A product command with its text input already validated.
#[derive(Debug)]
pub(crate) enum ProductAction {
    Add(ProductDraft),
    Edit(ProductId, ProductEdit),
    Delete(ProductId),
    Variants(ProductId),
}

impl ProductCommands {
    /// Decodes text-format variants so malformed input fails before any
    /// network call.
    pub(crate) fn prepare(self) -> anyhow::Result<ProductAction> {
        Ok(match self {
            Self::Add {
                name,
                price,
                description,
                image,
                variants,
            } => ProductAction::Add(ProductDraft {
                name,
                price,
                description,
                image,
                variants: variants.decode()?.unwrap_or_default(),
            }),
            Self::Edit {
                id,
                name,
                price,
                description,
                image,
                variants,
            } => ProductAction::Edit(
                ProductId::new(id),
                ProductEdit {
                    name,
                    price,
                    description,
                    image,
                    variants: variants.decode()?,
                },
            ),
            Self::Delete { id } => ProductAction::Delete(ProductId::new(id)),
            Self::Variants { id } => ProductAction::Variants(ProductId::new(id)),
        })
    }
}

pub(crate) async fn run(
    store: &mut Storefront,
    credentials: &Credentials,
    action: ProductAction,
) -> anyhow::Result<()> {
    match action {
        ProductAction::Variants(id) => {
            store.refresh().await?;
            let product = store
                .product(&id)
                .ok_or_else(|| anyhow::anyhow!("product {id} not found"))?;
            if product.variants.is_empty() {
                println!("product {id} has no variants");
            } else {
                println!("{}", encode_variant_text(&product.variants));
            }
        }
        ProductAction::Add(draft) => {
            sign_in_admin(store, credentials).await?;
            store.create(&draft).await?;
            println!("product \"{}\" created", draft.name.trim());
        }
        ProductAction::Edit(id, edit) => {
            sign_in_admin(store, credentials).await?;
            store.refresh().await?;
            let draft = {
                let current = store
                    .product(&id)
                    .ok_or_else(|| anyhow::anyhow!("product {id} not found"))?;
                merge_edit(
                    ProductDraft {
                        name: current.row.name().to_owned(),
                        price: current.row.price().map(|p| p.to_string()).unwrap_or_default(),
                        description: current.row.description().to_owned(),
                        image: current.row.image().to_owned(),
                        variants: current.variants.clone(),
                    },
                    edit,
                )
            };
            store.update(&id, &draft).await?;
            println!("product {id} updated");
        }
        ProductAction::Delete(id) => {
            sign_in_admin(store, credentials).await?;
            store.delete(&id).await?;
            println!("product {id} deleted");
        }
    }
    Ok(())
}

fn merge_edit(current: ProductDraft, edit: ProductEdit) -> ProductDraft {
    ProductDraft {
        name: edit.name.unwrap_or(current.name),
        price: edit.price.unwrap_or(current.price),
        description: edit.description.unwrap_or(current.description),
        image: edit.image.unwrap_or(current.image),
        variants: edit.variants.unwrap_or(current.variants),
    }
}
