use crate::controller::ResultView;
use crate::model::PriceStats;

pub fn format_result_view(view: &ResultView) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "## Search results for \"{}\" ({} listings)\n\n",
        view.keyword,
        view.products.len()
    ));

    format_stats(view.stats.as_ref(), &mut out);

    for (i, product) in view.products.iter().enumerate() {
        out.push_str(&format!("### {}. {}\n", i + 1, product.name));
        out.push_str(&format!("- **Price:** {}\n", product.price));
        out.push_str(&format!(
            "- **Rating:** {} ({} reviews)\n",
            product.rating_count, product.review_count
        ));
        out.push_str(&format!("- **Favorites:** {}\n", product.favorite_count));
        out.push_str(&format!("- **URL:** {}\n", product.url));
        out.push_str(&format!("- **Image:** {}\n", product.image_url));

        if i < view.products.len() - 1 {
            out.push_str("\n---\n\n");
        }
    }

    out
}

fn format_stats(stats: Option<&PriceStats>, out: &mut String) {
    match stats {
        Some(stats) => {
            out.push_str(&format!("- **Max price:** {}\n", format_amount(stats.max)));
            out.push_str(&format!("- **Min price:** {}\n", format_amount(stats.min)));
            out.push_str(&format!("- **Average price:** {:.2}\n", stats.average));
        }
        None => {
            out.push_str("- **Price stats:** no price data\n");
        }
    }
    out.push('\n');
}

/// Thousands-separated rendering; fractional amounts keep two decimals.
fn format_amount(value: f64) -> String {
    let negative = value < 0.0;
    let abs = value.abs();
    let whole = abs.trunc() as u64;
    let fraction = abs.fract();

    let mut grouped = String::new();
    let digits = whole.to_string();
    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let mut result: String = grouped.chars().rev().collect();

    if fraction > 0.0 {
        result = format!("{}.{:02}", result, (fraction * 100.0).round() as u64);
    }
    if negative {
        result.insert(0, '-');
    }
    result
}
