//! Storefront rendering: one text card per product.

use arenza_core::{PrintDisplay, ProductCard};
use arenza_store::Storefront;

pub(crate) async fn run(store: &mut Storefront, size: Option<&str>) -> anyhow::Result<()> {
    store.refresh().await?;
    if store.products().is_empty() {
        println!("no products yet");
        return Ok(());
    }
    for product in store.products() {
        println!("{}", render_card(product.id().as_str(), &product.card(size)));
    }
    Ok(())
}

pub(crate) fn render_card(id: &str, card: &ProductCard<'_>) -> String {
    let mut lines = Vec::new();
    lines.push(match &card.price_label {
        Some(price) => format!("#{id} {}  {price}", card.name),
        None => format!("#{id} {}", card.name),
    });
    if !card.description.is_empty() {
        lines.push(format!("  {}", card.description));
    }
    if !card.image.is_empty() {
        lines.push(format!("  photo: {}", card.image));
    }
    if !card.sizes.is_empty() {
        let sizes: Vec<String> = card
            .sizes
            .iter()
            .map(|s| {
                if Some(*s) == card.selected_size {
                    format!("[{s}]")
                } else {
                    (*s).to_owned()
                }
            })
            .collect();
        lines.push(format!("  sizes: {}", sizes.join(" ")));
    }
    match card.prints {
        Some(PrintDisplay::Images(urls)) => {
            lines.extend(urls.iter().map(|url| format!("  image: {url}")));
        }
        Some(PrintDisplay::Badges(names)) => lines.push(format!("  prints: {}", names.join(", "))),
        Some(PrintDisplay::Unavailable) => lines.push("  prints unavailable for this size".to_owned()),
        None => {}
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use arenza_core::Variant;
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn renders_selected_size_and_badges() {
        let variants = vec![
            Variant::new("P", vec!["Floral".into(), "Liso".into()]),
            Variant::new("M", vec!["Xadrez".into()]),
        ];
        let card = ProductCard::new(
            "Vestido",
            Some(Decimal::new(18990, 2)),
            "Linho",
            "",
            &variants,
            None,
        );
        assert_eq!(
            render_card("7", &card),
            "#7 Vestido  R$ 189,90\n  Linho\n  sizes: [P] M\n  prints: Floral, Liso"
        );
    }

    #[test]
    fn renders_image_prints_for_requested_size() {
        let variants = vec![
            Variant::new("P", vec!["Floral".into()]),
            Variant::new("G", vec!["https://cdn.example.com/g.jpg".into()]),
        ];
        let card = ProductCard::new("Saia", None, "", "", &variants, Some("G"));
        assert_eq!(
            render_card("2", &card),
            "#2 Saia\n  sizes: P [G]\n  image: https://cdn.example.com/g.jpg"
        );
    }

    #[test]
    fn renders_photo_and_one_line_per_image() {
        let variants = vec![Variant::new(
            "GG",
            vec![
                "https://cdn.example.com/a.jpg".into(),
                "https://cdn.example.com/b.jpg".into(),
            ],
        )];
        let card = ProductCard::new(
            "Maiô",
            None,
            "",
            "https://cdn.example.com/modelo.jpg",
            &variants,
            None,
        );
        assert_eq!(
            render_card("3", &card),
            "#3 Maiô\n  photo: https://cdn.example.com/modelo.jpg\n  sizes: [GG]\n  \
             image: https://cdn.example.com/a.jpg\n  image: https://cdn.example.com/b.jpg"
        );
    }

    #[test]
    fn renders_unavailable_for_unknown_size() {
        let variants = vec![Variant::new("P", vec!["Floral".into()])];
        let card = ProductCard::new("Saia", None, "", "", &variants, Some("GG"));
        assert!(render_card("2", &card).ends_with("prints unavailable for this size"));
    }
}
