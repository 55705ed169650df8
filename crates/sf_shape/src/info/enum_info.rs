use sf_utils::eq_no_case;

use crate::value::Value;

/// The unit variants of an enum, in declaration order.
///
/// The first variant is the zero member.
#[derive(Debug, Clone)]
pub struct EnumInfo {
    variants: &'static [&'static str],
    from_index: fn(usize) -> Option<Box<dyn Value>>,
}

impl EnumInfo {
    pub fn new(
        variants: &'static [&'static str],
        from_index: fn(usize) -> Option<Box<dyn Value>>,
    ) -> Self {
        Self {
            variants,
            from_index,
        }
    }

    #[inline]
    pub fn variants(&self) -> &'static [&'static str] {
        self.variants
    }

    /// Returns the index of the variant named `name`, ignoring case.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        let name = name.trim();
        self.variants
            .iter()
            .position(|variant| eq_no_case(variant, name))
    }

    /// Creates the variant at `index`.
    #[inline]
    pub fn variant_at(&self, index: usize) -> Option<Box<dyn Value>> {
        (self.from_index)(index)
    }

    /// Creates the variant named `name`, or the zero member if no variant matches.
    ///
    /// Returns `None` only for an enum without variants.
    pub fn parse(&self, name: &str) -> Option<Box<dyn Value>> {
        self.variant_at(self.index_of(name).unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use crate::derive::Shape;
    use crate::info::Typed;
    use crate::value::{Property, Value};

    #[derive(Shape, Clone, Copy, Debug, PartialEq)]
    enum Priority {
        Normal,
        #[shape(rename = "URGENT")]
        Urgent,
        Low,
    }

    #[test]
    fn variants_keep_declaration_order() {
        let info = Priority::type_info().as_enum().unwrap();
        assert_eq!(info.variants(), ["Normal", "URGENT", "Low"]);
        assert_eq!(info.index_of(" urgent "), Some(1));
        assert_eq!(info.index_of("Urgent!"), None);

        let low = info.variant_at(2).unwrap();
        assert_eq!(low.downcast_ref::<Priority>(), Some(&Priority::Low));
        assert!(info.variant_at(3).is_none());
    }

    #[test]
    fn unknown_names_give_the_zero_member() {
        let info = Priority::type_info().as_enum().unwrap();
        let parsed = info.parse("Critical").unwrap();
        assert_eq!(parsed.downcast_ref::<Priority>(), Some(&Priority::Normal));

        let zero = Priority::type_info().zero_value().unwrap();
        assert_eq!(zero.downcast_ref::<Priority>(), Some(&Priority::Normal));
    }

    #[test]
    fn variant_values() {
        assert_eq!(Priority::Urgent.invariant_text().as_deref(), Some("URGENT"));
        assert_eq!(Priority::Low.value_eq(&Priority::Low), Some(true));
        assert_eq!(Priority::Low.value_eq(&Priority::Urgent), Some(false));
        assert_eq!(Priority::Low.value_eq(&2_u8), Some(false));

        let text = "urgent".to_string();
        assert_eq!(Priority::from_value(Some(&text)), Some(Priority::Urgent));
        assert_eq!(Priority::from_value(Some(&Some(Priority::Low))), Some(Priority::Low));
        assert_eq!(Priority::from_value(Some(&3_i32)), None);
        assert_eq!(Priority::from_value(None), None);
    }
}
