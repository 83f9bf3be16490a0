use std::io::{self, Write};

use almanac_weather::UvReport;

use super::MAX_VALUES_SHOWN;

pub fn render(report: &UvReport, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Coordinates: {}", report.coord)?;
    for product in &report.products {
        writeln!(out, "\nProduct Name: {}", product.name)?;
        for value in product.values.iter().take(MAX_VALUES_SHOWN) {
            writeln!(out, "Time: {}, UV Index: {}", value.time, value.value)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_product_capped_at_ten() {
        let values: Vec<String> = (0..12)
            .map(|h| format!(r#"{{ "time": "2024-05-25T{h:02}:00:00Z", "value": {h}.5 }}"#))
            .collect();
        let raw = format!(
            r#"{{ "coord": "EPSG:4326,-39.0,174.0", "products": [
                {{ "name": "cloudy_sky_uv_index", "values": [{}] }},
                {{ "name": "clear_sky_uv_index", "values": [{}] }}
            ] }}"#,
            values.join(","),
            values[..3].join(",")
        );
        let report = almanac_weather::uv::parse(&raw).unwrap();

        let mut out = Vec::new();
        render(&report, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("Coordinates: EPSG:4326,-39.0,174.0\n"));
        assert!(text.contains("Product Name: cloudy_sky_uv_index"));
        assert!(text.contains("Product Name: clear_sky_uv_index"));
        assert_eq!(text.matches("UV Index:").count(), 13);
        assert!(!text.contains("UV Index: 11.5"));
    }
}
