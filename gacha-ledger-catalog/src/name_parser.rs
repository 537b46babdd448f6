//! Banner display-name resolution.
//!
//! Detail titles are the most specific name a banner has, but they arrive in
//! several shapes:
//! ```text
//! 角色活动祈愿「<b>流光拾遗</b>」
//! <p>流光拾遗</p>
//! ```
//! The list endpoint's `gacha_name` is plainer and used as a fallback.

/// Name recorded when neither the detail title nor the list name is usable.
pub const UNKNOWN_BANNER_NAME: &str = "未知卡池";

const OPEN_BRACKET: char = '「';
const CLOSE_BRACKET: char = '」';

/// Pick the display name for a banner.
///
/// Priority: the text inside the first non-empty `「…」` of the title, then
/// the whole title, then the list name, then [`UNKNOWN_BANNER_NAME`]. Markup
/// tags are stripped at every step.
///
/// # Examples
///
/// ```
/// use gacha_ledger_catalog::name_parser::resolve_banner_name;
///
/// assert_eq!(
///     resolve_banner_name(Some("角色活动祈愿「<b>流光拾遗</b>」"), Some("流光拾遗-2")),
///     "流光拾遗"
/// );
/// assert_eq!(resolve_banner_name(None, Some("常驻祈愿")), "常驻祈愿");
/// ```
pub fn resolve_banner_name(detail_title: Option<&str>, list_name: Option<&str>) -> String {
    if let Some(title) = detail_title.filter(|t| !t.is_empty()) {
        if let Some(inner) = bracketed_segment(title) {
            return strip_markup(inner);
        }

        let cleaned = strip_markup(title);
        let cleaned = cleaned.trim();
        if !cleaned.is_empty() {
            return cleaned.to_string();
        }
    }

    if let Some(name) = list_name {
        let cleaned = strip_markup(name);
        let cleaned = cleaned.trim();
        if !cleaned.is_empty() {
            return cleaned.to_string();
        }
    }

    UNKNOWN_BANNER_NAME.to_string()
}

/// Remove `<...>` markup tags. A lone `<` or an empty `<>` is kept as text.
pub fn strip_markup(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('>') {
            Some(close) if close > 0 => rest = &after[close + 1..],
            _ => {
                out.push('<');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// The first `「…」` segment with at least one character inside.
fn bracketed_segment(title: &str) -> Option<&str> {
    let mut rest = title;
    while let Some(open) = rest.find(OPEN_BRACKET) {
        let after = &rest[open + OPEN_BRACKET.len_utf8()..];
        let close = after.find(CLOSE_BRACKET)?;
        if close > 0 {
            return Some(&after[..close]);
        }
        rest = after;
    }
    None
}
