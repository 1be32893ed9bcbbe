//! Importing real-world stylesheet layouts and reading exports back.

use chartpal_css::{css_for_palette, parse_mode_colors, parse_named_colors, ColorNames};
use proptest::prelude::*;

const SHADCN: &str = r#"
@tailwind base;
@tailwind components;

@layer base {
  :root {
    --background: 0 0% 100%;
    --foreground: 222.2 84% 4.9%;
    --primary: 222.2 47.4% 11.2%;
    --primary-foreground: 210 40% 98%;
    --radius: 0.5rem;
    --chart-1: 12 76% 61%;
    --chart-2: 173 58% 39%;
  }

  .dark {
    --background: 222.2 84% 4.9%;
    --foreground: 210 40% 98%;
    --primary: 210 40% 98%;
    --primary-foreground: 222.2 47.4% 11.2%;
    --chart-1: 220 70% 50%;
    --chart-2: 160 60% 45%;
  }
}

@layer base {
  * {
    @apply border-border;
  }
  body {
    @apply bg-background text-foreground;
  }
}
"#;

#[test]
fn shadcn_named_colors_skip_non_colors() {
    let colors = parse_named_colors(SHADCN);
    assert!(colors.iter().all(|c| c.name != "radius"));
    assert_eq!(colors.len(), 12);
    assert_eq!(colors[0].name, "background");
    assert_eq!(colors[0].value, "#FFFFFF");
    assert_eq!(colors[2].name, "primary");
    assert_eq!(colors[2].value, "#0F172A");
}

#[test]
fn shadcn_modes_put_semantic_colors_first() {
    let modes = parse_mode_colors(SHADCN);
    // Four semantic colors, then the two chart colors.
    assert_eq!(modes.light.len(), 6);
    assert_eq!(modes.light[0], "#FFFFFF");
    assert_eq!(modes.light[2], "#0F172A");
    // foreground and primary share a value in dark mode.
    assert_eq!(modes.dark.len(), 5);
    assert_eq!(modes.dark[0], "#020817");
}

fn hex_strategy() -> impl Strategy<Value = String> {
    (any::<u8>(), any::<u8>(), any::<u8>()).prop_map(|(r, g, b)| format!("#{:02X}{:02X}{:02X}", r, g, b))
}

fn dedup(colors: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for c in colors {
        if !out.contains(c) {
            out.push(c.clone());
        }
    }
    out
}

proptest! {
    /// An unnamed export imports back as the same colors, in order.
    #[test]
    fn export_reads_back(
        light in prop::collection::vec(hex_strategy(), 1..12),
        dark in prop::collection::vec(hex_strategy(), 1..12),
    ) {
        let css = css_for_palette(&light, &dark, &ColorNames::new());
        let modes = parse_mode_colors(&css);
        prop_assert_eq!(modes.light, dedup(&light));
        prop_assert_eq!(modes.dark, dedup(&dark));
    }
}
