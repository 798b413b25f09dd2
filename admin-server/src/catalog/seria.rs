//! 商品系列号与编号派生
//!
//! 系列号 (`seria`) 在创建时由品牌名和商品名各取前两个字符拼接并转小写，
//! 编号 (`code`) 在同一系列内从 1 起递增。两者创建后保持稳定。

/// Derive the product seria from brand and product names
///
/// Takes up to the first two characters of each (names shorter than two
/// characters contribute what they have), lowercased.
pub fn derive_seria(brand_name: &str, product_name: &str) -> String {
    let prefix = |s: &str| s.chars().take(2).collect::<String>();

    format!("{}{}", prefix(brand_name), prefix(product_name.trim())).to_lowercase()
}

/// Next code within a seria: 1 for a fresh seria, max + 1 otherwise
pub fn next_code(current_max: Option<i64>) -> i64 {
    match current_max {
        Some(max) => max + 1,
        None => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_seria_takes_two_char_prefixes() {
        assert_eq!(derive_seria("Nike", "Air Max"), "niai");
        assert_eq!(derive_seria("Adidas", "Samba"), "adsa");
    }

    #[test]
    fn test_derive_seria_trims_product_name() {
        assert_eq!(derive_seria("Nike", "  Air Max  "), "niai");
    }

    #[test]
    fn test_derive_seria_lowercases() {
        assert_eq!(derive_seria("PUMA", "RS-X"), "purs");
    }

    #[test]
    fn test_derive_seria_short_names() {
        // Reference rows may carry single-character names
        assert_eq!(derive_seria("X", "Go"), "xgo");
    }

    #[test]
    fn test_derive_seria_multibyte() {
        assert_eq!(derive_seria("李宁", "飞电跑鞋"), "李宁飞电");
    }

    #[test]
    fn test_next_code() {
        assert_eq!(next_code(None), 1);
        assert_eq!(next_code(Some(1)), 2);
        assert_eq!(next_code(Some(41)), 42);
    }
}
