/// Converts an upper- or mixed-camel-case identifier into the lowercase,
/// underscore separated form used for table and column names.
///
/// Every ASCII uppercase letter is lowercased and, unless it starts the
/// identifier or directly follows an underscore, prefixed with `_`. All other
/// characters pass through unchanged, so already normalized input is returned
/// as is.
///
/// ```
/// use rowgraph_core::schema::normalize;
///
/// assert_eq!(normalize("CustomerOrder"), "customer_order");
/// assert_eq!(normalize("Order_Product"), "order_product");
/// ```
pub fn normalize(ident: &str) -> String {
    let mut ret = String::with_capacity(ident.len() + 4);

    for ch in ident.chars() {
        if ch.is_ascii_uppercase() {
            if !ret.is_empty() && !ret.ends_with('_') {
                ret.push('_');
            }
            ret.push(ch.to_ascii_lowercase());
        } else {
            ret.push(ch);
        }
    }

    ret
}
