use super::ITEM_SEPARATOR;

const ESCAPE: char = '\\';

/// Joins item texts with [`ITEM_SEPARATOR`], escaping separators and
/// escapes inside the items.
pub(crate) fn join_items<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut text = String::new();
    for (index, item) in items.into_iter().enumerate() {
        if index > 0 {
            text.push(ITEM_SEPARATOR);
        }
        for c in item.as_ref().chars() {
            if c == ITEM_SEPARATOR || c == ESCAPE {
                text.push(ESCAPE);
            }
            text.push(c);
        }
    }
    text
}

/// Splits text produced by [`join_items`] back into its items.
///
/// Empty text is one empty item; callers decide whether that means no items.
/// A trailing lone escape is kept as is.
pub(crate) fn split_items(text: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut item = String::new();
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        match c {
            ESCAPE => item.push(chars.next().unwrap_or(ESCAPE)),
            ITEM_SEPARATOR => items.push(core::mem::take(&mut item)),
            _ => item.push(c),
        }
    }
    items.push(item);
    items
}
