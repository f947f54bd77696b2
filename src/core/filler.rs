use crate::adapters::docx::Document;
use crate::domain::model::PlaceholderMap;

/// 對單一元素文字套用所有佔位符；沒有任何佔位符出現時回傳 `None`
///
/// 只掃描原始文字一次，填入的值不會再被當成佔位符展開，結果與對照表順序無關。
/// 同一位置有多個佔位符符合時取最長者。
pub fn substitute(text: &str, placeholders: &PlaceholderMap) -> Option<String> {
    let mut result = String::with_capacity(text.len());
    let mut rest = text;
    let mut replaced = false;

    loop {
        let next = placeholders
            .iter()
            .filter(|(token, _)| !token.is_empty())
            .filter_map(|(token, value)| rest.find(token).map(|at| (at, token, value)))
            .min_by(|a, b| a.0.cmp(&b.0).then(b.1.len().cmp(&a.1.len())));

        let Some((at, token, value)) = next else {
            break;
        };
        result.push_str(&rest[..at]);
        result.push_str(value);
        rest = &rest[at + token.len()..];
        replaced = true;
    }

    if !replaced {
        return None;
    }
    result.push_str(rest);
    Some(result)
}

/// 將佔位符填入文件的每個段落與表格儲存格，回傳新文件
///
/// 比對的是元素串接後的完整文字，所以跨 run 的佔位符也能替換；
/// 被替換的元素會合併為單一 run。沒有佔位符的元素維持原樣。
pub fn fill(document: &Document, placeholders: &PlaceholderMap) -> Document {
    let elements = document.elements();

    let replacements: Vec<_> = elements
        .iter()
        .filter_map(|element| {
            substitute(element.text(), placeholders).map(|text| (element, text))
        })
        .collect();

    tracing::debug!(
        "Filling {} of {} text elements",
        replacements.len(),
        elements.len()
    );

    document.with_replaced(&replacements)
}
