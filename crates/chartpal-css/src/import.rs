//! Reading chart colors out of existing stylesheets.
//!
//! Design systems usually already define their palette as CSS custom
//! properties, often in the shadcn layout:
//!
//! ```css
//! @layer base {
//!   :root {
//!     --primary: 222.2 47.4% 11.2%;
//!     --chart-1: #e11d48;
//!   }
//!   .dark {
//!     --primary: 210 40% 98%;
//!     --chart-1: var(--primary);
//!   }
//! }
//! ```
//!
//! Two readers are provided:
//!
//! - [`parse_named_colors`] collects every custom property whose value is a
//!   color, wherever it appears, plus bare hex lines (a pasted list of
//!   `#rrggbb` values also counts as a stylesheet). Declarations pasted with
//!   no enclosing rule are read too. This feeds the engine's pool.
//! - [`parse_mode_colors`] reads the light (`:root`) and dark (`.dark`)
//!   blocks separately, resolving `var()` references, and is used to show
//!   what a stylesheet currently looks like in each mode.
//!
//! The parser is built on `cssparser`. Declarations it does not understand
//! are skipped; importing never fails, it only finds fewer colors.
//!
//! # Accepted values
//!
//! | Form | Example |
//! |------|---------|
//! | hex | `#e11d48`, `#f00` |
//! | bare HSL triple | `222.2 47.4% 11.2%`, `222 47 11%` |
//! | HSL function | `hsl(222 47% 11%)`, `hsla(222, 47%, 11%, 0.5)` |
//! | reference (mode colors only) | `var(--primary)` |

use std::collections::{HashMap, HashSet};

use chartpal_engine::{Hsl, NamedColor, Rgb};
use cssparser::{
    AtRuleParser, CowRcStr, DeclarationParser, ParseError, Parser, ParserInput, ParserState,
    QualifiedRuleParser, RuleBodyItemParser, RuleBodyParser, Token,
};
use tracing::debug;

/// Names listed before the rest in [`parse_mode_colors`], optionally with a
/// `-foreground` suffix.
const SEMANTIC_NAMES: [&str; 11] = [
    "primary",
    "secondary",
    "accent",
    "muted",
    "background",
    "foreground",
    "success",
    "warning",
    "error",
    "destructive",
    "creative",
];

/// Resolved colors of a stylesheet's light and dark blocks, as `#RRGGBB`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModeColors {
    pub light: Vec<String>,
    pub dark: Vec<String>,
}

/// Every named color in `css`, in document order.
///
/// Custom property names lose their leading `--`. Bare hex lines are named
/// by their digits. Values are normalized to uppercase `#RRGGBB`; duplicates
/// are kept.
pub fn parse_named_colors(css: &str) -> Vec<NamedColor> {
    let sheet = Sheet::scan(css);
    let mut colors: Vec<NamedColor> = sheet
        .declarations
        .iter()
        .filter_map(|decl| {
            decl.value
                .color()
                .map(|rgb| NamedColor::new(&decl.name, rgb.to_hex()))
        })
        .collect();
    colors.extend(bare_hex_lines(css));
    debug!(found = colors.len(), "imported named colors");
    colors
}

/// The light and dark colors defined by `css`.
///
/// Light colors come from `:root` rules and dark colors from `.dark` rules.
/// Semantic names (`primary`, `accent`, ...) come first. Without any `:root`
/// rule, light falls back to every HSL-triple color in the document; an
/// empty dark side falls back to light.
pub fn parse_mode_colors(css: &str) -> ModeColors {
    let sheet = Sheet::scan(css);
    let variables: HashMap<&str, &Value> = sheet
        .declarations
        .iter()
        .map(|decl| (decl.name.as_str(), &decl.value))
        .collect();

    let light = if sheet.has_root {
        sheet.mode_colors(Scope::Root, &variables)
    } else {
        let mut seen = HashSet::new();
        sheet
            .declarations
            .iter()
            .filter_map(|decl| match decl.value {
                Value::Triple(rgb) => Some(rgb),
                _ => None,
            })
            .filter(|rgb| seen.insert(*rgb))
            .map(Rgb::to_hex)
            .collect()
    };

    let mut dark = sheet.mode_colors(Scope::Dark, &variables);
    if dark.is_empty() {
        dark = light.clone();
    }

    ModeColors { light, dark }
}

// ─── Collected declarations ────────────────────────────────────────────────

/// Which block a declaration was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Root,
    Dark,
    Other,
}

impl Scope {
    fn of_selector(selector: &str) -> Self {
        let selectors: Vec<&str> = selector.split(',').map(str::trim).collect();
        if selectors.contains(&":root") {
            Scope::Root
        } else if selectors.iter().any(|s| s.ends_with(".dark")) {
            Scope::Dark
        } else {
            Scope::Other
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Value {
    Hex(Rgb),
    Triple(Rgb),
    Function(Rgb),
    /// `var(--name)`, stored without the dashes.
    Var(String),
    Other,
}

impl Value {
    fn color(&self) -> Option<Rgb> {
        match self {
            Value::Hex(rgb) | Value::Triple(rgb) | Value::Function(rgb) => Some(*rgb),
            Value::Var(_) | Value::Other => None,
        }
    }
}

#[derive(Debug, Clone)]
struct Declaration {
    name: String,
    value: Value,
    scope: Scope,
}

#[derive(Debug, Default)]
struct Sheet {
    declarations: Vec<Declaration>,
    has_root: bool,
    skipped: usize,
}

impl Sheet {
    fn scan(css: &str) -> Self {
        let mut input = ParserInput::new(css);
        let mut parser = Parser::new(&mut input);
        let mut sheet = Sheet::default();

        let rejected = cssparser::StyleSheetParser::new(&mut parser, &mut sheet)
            .filter(Result::is_err)
            .count();
        sheet.skipped += rejected;

        if sheet.declarations.is_empty() {
            sheet.scan_bare_declarations(css);
        }

        debug!(
            declarations = sheet.declarations.len(),
            skipped = sheet.skipped,
            "scanned stylesheet"
        );
        sheet
    }

    /// Reads `css` as one rule body, for custom properties pasted without an
    /// enclosing selector.
    fn scan_bare_declarations(&mut self, css: &str) {
        let mut input = ParserInput::new(css);
        let mut parser = Parser::new(&mut input);
        let mut body = BodyParser {
            scope: Scope::Other,
        };
        for item in RuleBodyParser::new(&mut parser, &mut body) {
            match item {
                Ok(Some(decl)) => self.declarations.push(decl),
                Ok(None) => {}
                Err(_) => self.skipped += 1,
            }
        }
    }

    fn mode_colors(&self, scope: Scope, variables: &HashMap<&str, &Value>) -> Vec<String> {
        let (semantic, rest): (Vec<&Declaration>, Vec<&Declaration>) = self
            .declarations
            .iter()
            .filter(|decl| decl.scope == scope)
            .partition(|decl| is_semantic(&decl.name));

        let mut seen = HashSet::new();
        semantic
            .into_iter()
            .chain(rest)
            .filter_map(|decl| resolve(&decl.value, variables, &mut HashSet::new()))
            .filter(|rgb| seen.insert(*rgb))
            .map(Rgb::to_hex)
            .collect()
    }
}

fn is_semantic(name: &str) -> bool {
    let base = name.strip_suffix("-foreground").unwrap_or(name);
    SEMANTIC_NAMES.contains(&base)
}

/// Follows `var()` chains to a color. Cycles and dangling references
/// resolve to `None`.
fn resolve<'a>(
    value: &'a Value,
    variables: &HashMap<&str, &'a Value>,
    visiting: &mut HashSet<&'a str>,
) -> Option<Rgb> {
    match value {
        Value::Var(name) => {
            if !visiting.insert(name.as_str()) {
                return None;
            }
            let target: &'a Value = variables.get(name.as_str()).copied()?;
            resolve(target, variables, visiting)
        }
        other => other.color(),
    }
}

/// Lines (split on newlines and commas) that are exactly a 6-digit hex.
fn bare_hex_lines(css: &str) -> impl Iterator<Item = NamedColor> + '_ {
    css.split(['\n', ','])
        .map(str::trim)
        .filter_map(|line| {
            let digits = line.strip_prefix('#').unwrap_or(line);
            if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
                return None;
            }
            let rgb = Rgb::from_hex(digits).ok()?;
            Some(NamedColor::new(digits, rgb.to_hex()))
        })
}

// ─── cssparser glue ────────────────────────────────────────────────────────

impl<'i> QualifiedRuleParser<'i> for Sheet {
    type Prelude = Scope;
    type QualifiedRule = ();
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        let start = input.position();
        while input.next().is_ok() {}
        Ok(Scope::of_selector(input.slice_from(start)))
    }

    fn parse_block<'t>(
        &mut self,
        scope: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::QualifiedRule, ParseError<'i, Self::Error>> {
        if scope == Scope::Root {
            self.has_root = true;
        }

        let mut body = BodyParser { scope };
        for item in RuleBodyParser::new(input, &mut body) {
            match item {
                Ok(Some(decl)) => self.declarations.push(decl),
                Ok(None) => {}
                Err(_) => self.skipped += 1,
            }
        }
        Ok(())
    }
}

impl<'i> AtRuleParser<'i> for Sheet {
    type Prelude = ();
    type AtRule = ();
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        // Grouping rules whose blocks hold ordinary rules.
        match name.as_ref() {
            "layer" | "media" | "supports" | "container" => {
                while input.next().is_ok() {}
                Ok(())
            }
            _ => Err(input.new_custom_error::<(), ()>(())),
        }
    }

    fn rule_without_block(
        &mut self,
        _prelude: Self::Prelude,
        _start: &ParserState,
    ) -> Result<Self::AtRule, ()> {
        // `@layer base, components;` declares order only.
        Ok(())
    }

    fn parse_block<'t>(
        &mut self,
        _prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::AtRule, ParseError<'i, Self::Error>> {
        let rejected = cssparser::StyleSheetParser::new(input, self)
            .filter(Result::is_err)
            .count();
        self.skipped += rejected;
        Ok(())
    }
}

struct BodyParser {
    scope: Scope,
}

impl<'i> DeclarationParser<'i> for BodyParser {
    /// `None` for ordinary properties, which are not colors of interest.
    type Declaration = Option<Declaration>;
    type Error = ();

    fn parse_value<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Declaration, ParseError<'i, Self::Error>> {
        let Some(custom) = name.strip_prefix("--") else {
            while input.next().is_ok() {}
            return Ok(None);
        };

        let value = parse_value(input);
        while input.next().is_ok() {}
        Ok(Some(Declaration {
            name: custom.to_string(),
            value,
            scope: self.scope,
        }))
    }
}

impl<'i> AtRuleParser<'i> for BodyParser {
    type Prelude = ();
    type AtRule = Option<Declaration>;
    type Error = ();
}

impl<'i> QualifiedRuleParser<'i> for BodyParser {
    type Prelude = ();
    type QualifiedRule = Option<Declaration>;
    type Error = ();
}

impl<'i> RuleBodyItemParser<'i, Option<Declaration>, ()> for BodyParser {
    fn parse_declarations(&self) -> bool {
        true
    }
    fn parse_qualified(&self) -> bool {
        false
    }
}

// ─── Value parsing ─────────────────────────────────────────────────────────

fn parse_value(input: &mut Parser<'_, '_>) -> Value {
    if let Ok(rgb) = entire(input, parse_hex) {
        return Value::Hex(rgb);
    }
    if let Ok(name) = entire(input, parse_var) {
        return Value::Var(name);
    }
    if let Ok(rgb) = entire(input, parse_hsl_function) {
        return Value::Function(rgb);
    }
    if let Ok(rgb) = entire(input, parse_triple) {
        return Value::Triple(rgb);
    }
    Value::Other
}

/// Runs `parse` and requires it to consume the whole value (an
/// `!important` suffix aside). Rewinds on failure.
fn entire<'i, 't, T>(
    input: &mut Parser<'i, 't>,
    parse: impl FnOnce(&mut Parser<'i, 't>) -> Result<T, ParseError<'i, ()>>,
) -> Result<T, ParseError<'i, ()>> {
    input.try_parse(|input| {
        let value = parse(input)?;
        let _ = input.try_parse(cssparser::parse_important);
        input.expect_exhausted()?;
        Ok(value)
    })
}

fn parse_hex<'i, 't>(input: &mut Parser<'i, 't>) -> Result<Rgb, ParseError<'i, ()>> {
    let location = input.current_source_location();
    match input.next()? {
        Token::Hash(digits) | Token::IDHash(digits) => {
            Rgb::from_hex(digits.as_ref()).map_err(|_| location.new_custom_error(()))
        }
        _ => Err(location.new_custom_error(())),
    }
}

fn parse_var<'i, 't>(input: &mut Parser<'i, 't>) -> Result<String, ParseError<'i, ()>> {
    input.expect_function_matching("var")?;
    input.parse_nested_block(|input| {
        let location = input.current_source_location();
        let name = input.expect_ident()?.clone();
        let Some(stripped) = name.strip_prefix("--") else {
            return Err(location.new_custom_error(()));
        };
        let stripped = stripped.to_string();
        // Fallback values are ignored.
        while input.next().is_ok() {}
        Ok(stripped)
    })
}

fn parse_hsl_function<'i, 't>(input: &mut Parser<'i, 't>) -> Result<Rgb, ParseError<'i, ()>> {
    let location = input.current_source_location();
    let name = input.expect_function()?.clone();
    if !name.eq_ignore_ascii_case("hsl") && !name.eq_ignore_ascii_case("hsla") {
        return Err(location.new_custom_error(()));
    }
    input.parse_nested_block(|input| {
        let h = parse_hue(input)?;
        skip_comma(input);
        let s = parse_percent(input)?;
        skip_comma(input);
        let l = parse_percent(input)?;
        // Alpha, whether after a comma or a slash.
        while input.next().is_ok() {}
        Ok(Hsl::new(h, s, l).to_rgb())
    })
}

/// `H S% L%` with the saturation `%` optional and lightness `%` required.
fn parse_triple<'i, 't>(input: &mut Parser<'i, 't>) -> Result<Rgb, ParseError<'i, ()>> {
    let h = parse_hue(input)?;
    let s = parse_percent(input)?;
    let location = input.current_source_location();
    let l = match input.next()? {
        Token::Percentage { unit_value, .. } => f64::from(*unit_value) * 100.0,
        _ => return Err(location.new_custom_error(())),
    };
    // Optional `/ alpha`.
    let _ = input.try_parse(|input| -> Result<(), ParseError<'i, ()>> {
        input.expect_delim('/')?;
        input.next()?;
        Ok(())
    });
    Ok(Hsl::new(h, s, l).to_rgb())
}

fn parse_hue<'i, 't>(input: &mut Parser<'i, 't>) -> Result<f64, ParseError<'i, ()>> {
    let location = input.current_source_location();
    match input.next()? {
        Token::Number { value, .. } => Ok(f64::from(*value)),
        Token::Dimension { value, unit, .. } if unit.eq_ignore_ascii_case("deg") => {
            Ok(f64::from(*value))
        }
        _ => Err(location.new_custom_error(())),
    }
}

/// A percentage, or a bare number read as percent.
fn parse_percent<'i, 't>(input: &mut Parser<'i, 't>) -> Result<f64, ParseError<'i, ()>> {
    let location = input.current_source_location();
    match input.next()? {
        Token::Percentage { unit_value, .. } => Ok(f64::from(*unit_value) * 100.0),
        Token::Number { value, .. } => Ok(f64::from(*value)),
        _ => Err(location.new_custom_error(())),
    }
}

fn skip_comma(input: &mut Parser<'_, '_>) {
    let _ = input.try_parse(|input| input.expect_comma());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(colors: &[NamedColor]) -> Vec<&str> {
        colors.iter().map(|c| c.name.as_str()).collect()
    }

    fn values(colors: &[NamedColor]) -> Vec<&str> {
        colors.iter().map(|c| c.value.as_str()).collect()
    }

    // =====================================================================
    // Named colors
    // =====================================================================

    #[test]
    fn reads_hex_custom_properties() {
        let css = ":root { --brand: #e11d48; --accent: #0F0; color: red; }";
        let colors = parse_named_colors(css);
        assert_eq!(names(&colors), vec!["brand", "accent"]);
        assert_eq!(values(&colors), vec!["#E11D48", "#00FF00"]);
    }

    #[test]
    fn reads_shadcn_hsl_triples() {
        let css = ":root { --primary: 0 100% 50%; --ring: 120 100 25%; }";
        let colors = parse_named_colors(css);
        assert_eq!(values(&colors), vec!["#FF0000", "#008000"]);
    }

    #[test]
    fn reads_fractional_triples() {
        let css = ":root { --primary: 222.2 47.4% 11.2%; }";
        let colors = parse_named_colors(css);
        assert_eq!(values(&colors), vec!["#0F172A"]);
    }

    #[test]
    fn reads_hsl_functions() {
        let css = ".x { --a: hsl(240 100% 50%); --b: hsla(0, 100%, 50%, 0.5); --c: hsl(120deg 100% 25% / 80%); }";
        let colors = parse_named_colors(css);
        assert_eq!(values(&colors), vec!["#0000FF", "#FF0000", "#008000"]);
    }

    #[test]
    fn reads_inside_grouping_rules() {
        let css = r#"
            @layer base, components;
            @layer base {
                :root { --one: #111111; }
                @media (prefers-color-scheme: dark) {
                    .card { --two: #222222; }
                }
            }
            @supports (display: grid) {
                .grid { --three: #333333; }
            }
        "#;
        let colors = parse_named_colors(css);
        assert_eq!(names(&colors), vec!["one", "two", "three"]);
    }

    #[test]
    fn ignores_non_color_custom_properties() {
        let css = ":root { --radius: 0.5rem; --font: Inter, sans-serif; --ref: var(--x); --ok: #abc; }";
        let colors = parse_named_colors(css);
        assert_eq!(names(&colors), vec!["ok"]);
        assert_eq!(values(&colors), vec!["#AABBCC"]);
    }

    #[test]
    fn important_suffix_is_tolerated() {
        let css = ":root { --brand: #123456 !important; }";
        assert_eq!(values(&parse_named_colors(css)), vec!["#123456"]);
    }

    #[test]
    fn reads_declarations_without_a_rule() {
        let css = "--chart-1: 12 76% 61%;\n--chart-2: #e11d48;\n--chart-3: 173 58% 39%;\n";
        let colors = parse_named_colors(css);
        assert_eq!(names(&colors), vec!["chart-1", "chart-2", "chart-3"]);
        assert_eq!(colors[1].value, "#E11D48");
        assert_eq!(colors[0].value, Hsl::new(12.0, 76.0, 61.0).to_rgb().to_hex());
    }

    #[test]
    fn bare_declarations_feed_light_mode() {
        let css = "--a: 0 100% 50%;\n--b: 240 100% 50%;";
        let modes = parse_mode_colors(css);
        assert_eq!(modes.light, vec!["#FF0000", "#0000FF"]);
        assert_eq!(modes.dark, modes.light);
    }

    #[test]
    fn bare_hex_lines_are_named_by_digits() {
        let css = "#ff0000\n00ff00, #0000FF\nnot-a-color\n#abc";
        let colors = parse_named_colors(css);
        assert_eq!(names(&colors), vec!["ff0000", "00ff00", "0000FF"]);
        assert_eq!(values(&colors), vec!["#FF0000", "#00FF00", "#0000FF"]);
    }

    #[test]
    fn duplicates_are_kept() {
        let css = ":root { --a: #ff0000; --b: #FF0000; }";
        assert_eq!(parse_named_colors(css).len(), 2);
    }

    #[test]
    fn garbage_yields_nothing() {
        assert!(parse_named_colors("}}}{{ not css at all ;;;").is_empty());
        assert!(parse_named_colors("").is_empty());
    }

    #[test]
    fn broken_rule_does_not_hide_later_rules() {
        let css = ":root { --a: #ff0000; } @@@ { } .x { --b: #00ff00; }";
        let colors = parse_named_colors(css);
        assert!(names(&colors).contains(&"a"));
        assert!(names(&colors).contains(&"b"));
    }

    // =====================================================================
    // Mode colors
    // =====================================================================

    #[test]
    fn splits_root_and_dark() {
        let css = r#"
            :root { --chart-1: #e11d48; --chart-2: #2563eb; }
            .dark { --chart-1: #fb7185; --chart-2: #60a5fa; }
        "#;
        let modes = parse_mode_colors(css);
        assert_eq!(modes.light, vec!["#E11D48", "#2563EB"]);
        assert_eq!(modes.dark, vec!["#FB7185", "#60A5FA"]);
    }

    #[test]
    fn semantic_names_come_first() {
        let css = ":root { --chart-1: #111111; --primary-foreground: #222222; --accent: #333333; }";
        let modes = parse_mode_colors(css);
        assert_eq!(modes.light, vec!["#222222", "#333333", "#111111"]);
    }

    #[test]
    fn mode_colors_are_deduplicated() {
        let css = ":root { --primary: #ff0000; --chart-1: #FF0000; --chart-2: #00ff00; }";
        assert_eq!(parse_mode_colors(css).light, vec!["#FF0000", "#00FF00"]);
    }

    #[test]
    fn resolves_var_references() {
        let css = r#"
            .palette { --red: #ff0000; --alias: var(--red); }
            :root { --chart-1: var(--alias); --chart-2: var(--missing); }
        "#;
        let modes = parse_mode_colors(css);
        assert_eq!(modes.light, vec!["#FF0000"]);
    }

    #[test]
    fn reference_cycles_resolve_to_nothing() {
        let css = ":root { --a: var(--b); --b: var(--a); --c: #00ff00; }";
        assert_eq!(parse_mode_colors(css).light, vec!["#00FF00"]);
    }

    #[test]
    fn dark_falls_back_to_light() {
        let css = ":root { --chart-1: #e11d48; }";
        let modes = parse_mode_colors(css);
        assert_eq!(modes.dark, modes.light);
    }

    #[test]
    fn without_root_light_is_every_triple() {
        let css = ".theme { --a: 0 100% 50%; --b: #00ff00; --c: 0 100% 50%; --d: 240 100% 50%; }";
        let modes = parse_mode_colors(css);
        assert_eq!(modes.light, vec!["#FF0000", "#0000FF"]);
    }

    #[test]
    fn dark_selector_variants() {
        assert_eq!(Scope::of_selector(".dark"), Scope::Dark);
        assert_eq!(Scope::of_selector("html.dark"), Scope::Dark);
        assert_eq!(Scope::of_selector(":root, .light"), Scope::Root);
        assert_eq!(Scope::of_selector(".darkness"), Scope::Other);
    }
}
