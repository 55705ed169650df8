use crate::info::{ConstructorInfo, MemberInfo};
use crate::value::Value;

/// Members, constructors and activator of a struct.
///
/// Members and constructors keep their declaration order, which is the
/// order property discovery walks them in.
///
/// # Examples
///
/// ```
/// use sf_shape::derive::Shape;
/// use sf_shape::info::{MemberKind, Typed};
///
/// #[derive(Shape, Clone, Debug, Default)]
/// #[shape(default)]
/// struct Item {
///     pub id: u32,
///     #[shape(get)]
///     label: String,
///     cache: Vec<u8>,
/// }
///
/// let info = Item::type_info().as_struct().unwrap();
///
/// // `cache` is private and not exposed.
/// assert_eq!(info.members().len(), 2);
/// assert!(matches!(info.member("label").unwrap().kind(), MemberKind::Property { .. }));
/// assert!(info.activator().is_some());
/// ```
#[derive(Debug, Clone)]
pub struct StructInfo {
    members: Box<[MemberInfo]>,
    constructors: Box<[ConstructorInfo]>,
    activator: Option<fn() -> Box<dyn Value>>,
}

impl StructInfo {
    pub fn new(members: Vec<MemberInfo>) -> Self {
        Self {
            members: members.into_boxed_slice(),
            constructors: Box::new([]),
            activator: None,
        }
    }

    #[inline]
    pub fn with_constructors(mut self, constructors: Vec<ConstructorInfo>) -> Self {
        self.constructors = constructors.into_boxed_slice();
        self
    }

    /// Sets the zero-argument activator.
    #[inline]
    pub fn with_activator(mut self, activator: fn() -> Box<dyn Value>) -> Self {
        self.activator = Some(activator);
        self
    }

    #[inline]
    pub fn members(&self) -> &[MemberInfo] {
        &self.members
    }

    /// Returns the member with exactly this name.
    pub fn member(&self, name: &str) -> Option<&MemberInfo> {
        self.members.iter().find(|member| member.name() == name)
    }

    #[inline]
    pub fn constructors(&self) -> &[ConstructorInfo] {
        &self.constructors
    }

    #[inline]
    pub fn activator(&self) -> Option<fn() -> Box<dyn Value>> {
        self.activator
    }
}

#[cfg(test)]
mod tests {
    use core::marker::PhantomData;

    use crate::derive::Shape;
    use crate::info::{Access, MemberKind, Typed};
    use crate::value::Value;

    #[derive(Shape, Clone, Debug)]
    struct Marker;

    #[derive(Shape, Clone, Debug, Default)]
    #[shape(default)]
    struct Account {
        pub id: u64,
        #[shape(read_only)]
        pub opened: u32,
        #[shape(get, set, rename = "Owner")]
        r#owner: String,
        #[shape(get, private_set)]
        balance: i64,
        #[shape(skip)]
        pub cache: Vec<u8>,
        note: String,
    }

    #[derive(Shape, Clone, Debug, Default)]
    #[shape(default)]
    struct Tagged<T: Clone + Default + core::fmt::Debug> {
        pub tag: String,
        #[shape(skip)]
        pub marker: PhantomData<T>,
    }

    #[test]
    fn members_follow_field_attributes() {
        let info = Account::type_info().as_struct().unwrap();
        let names: Vec<_> = info.members().iter().map(|m| m.name()).collect();
        assert_eq!(names, ["id", "opened", "Owner", "balance"]);

        assert_eq!(
            info.member("opened").unwrap().kind(),
            MemberKind::Field {
                public: true,
                read_only: true
            }
        );
        assert!(info.member("opened").unwrap().setter().is_none());
        assert_eq!(
            info.member("Owner").unwrap().kind(),
            MemberKind::Property {
                getter: Access::Public,
                setter: Access::Public,
                indexed: false
            }
        );
        assert!(!info.member("balance").unwrap().is_public_writable());
        assert!(info.member("balance").unwrap().setter().is_some());
        let _ = Account::default().note;
    }

    #[test]
    fn accessors_read_and_write_fields() {
        let info = Account::type_info().as_struct().unwrap();
        let owner = info.member("Owner").unwrap();
        let mut account = Account::default();

        let set = owner.setter().unwrap();
        assert!(set(&mut account, Some(&"Ada".to_string())));
        assert_eq!(account.owner, "Ada");

        // Wrong incoming type, wrong instance type.
        assert!(!set(&mut account, Some(&5_i32)));
        assert!(!set(&mut 1_u8, Some(&"Ada".to_string())));

        let get = owner.getter().unwrap();
        let read = get(&account).unwrap();
        assert_eq!(read.downcast_ref::<String>().map(String::as_str), Some("Ada"));
        assert!(get(&1_u8).is_none());
    }

    #[test]
    fn unit_structs_activate_themselves() {
        let info = Marker::type_info();
        let value = (info.as_struct().unwrap().activator().unwrap())();
        assert!(value.is::<Marker>());
        assert!(info.zero_value().is_some());
    }

    #[test]
    fn generic_structs_have_one_info_per_instantiation() {
        let a = <Tagged<u8>>::type_info();
        let b = <Tagged<i64>>::type_info();
        assert_ne!(a.type_id(), b.type_id());
        assert!(core::ptr::eq(a, <Tagged<u8>>::type_info()));
        assert_eq!(a.as_struct().unwrap().members().len(), 1);
        assert!(Tagged::<u8>::default().value_info().is::<Tagged<u8>>());
    }
}
