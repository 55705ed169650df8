use log::trace;
use sf_utils::{NoCaseMap, eq_no_case};

use crate::describe::{PropertyDescriptor, TypeDescriptor};
use crate::info::{ConstructorInfo, Getter, MemberInfo, ParamInfo, StructInfo, TypeInfo};

/// A type is immutable when no public field is writable and no property
/// has a public setter.
fn is_immutable(shape: &StructInfo) -> bool {
    !shape.members().iter().any(MemberInfo::is_public_writable)
}

/// The public constructor with the most parameters, the first declared on ties.
fn select_constructor(shape: &StructInfo) -> Option<&ConstructorInfo> {
    shape
        .constructors()
        .iter()
        .filter(|constructor| constructor.is_public())
        .fold(None, |best, constructor| match best {
            Some(best) if best.arity() >= constructor.arity() => Some(best),
            _ => Some(constructor),
        })
}

/// Finds the getter of a public readable member matching a parameter by
/// name, ignoring case, and by underlying type.
fn bind_getter(shape: &StructInfo, param: &ParamInfo) -> Option<Getter> {
    let param_type = param.type_info().underlying().type_id();
    shape
        .members()
        .iter()
        .find(|member| {
            member.is_public_readable()
                && eq_no_case(member.name(), param.name())
                && member.type_info().underlying().type_id() == param_type
        })
        .and_then(MemberInfo::getter)
}

#[derive(Default)]
struct Discovered {
    properties: Vec<PropertyDescriptor>,
    by_name: NoCaseMap<usize>,
}

impl Discovered {
    #[inline]
    fn next_ordinal(&self) -> usize {
        self.properties.len()
    }

    /// Adds a descriptor unless its name is already taken.
    fn push(&mut self, name: &str, build: impl FnOnce(usize) -> PropertyDescriptor) {
        let ordinal = self.next_ordinal();
        if self.by_name.try_insert(name, ordinal) {
            self.properties.push(build(ordinal));
        }
    }
}

/// Discovers the property set of a type.
///
/// Constructor parameters of an immutable type come first, at their
/// positions. Public readable members not yet named follow in declaration
/// order.
pub(crate) fn discover(info: &'static TypeInfo) -> TypeDescriptor {
    let mut discovered = Discovered::default();

    let Some(shape) = info.as_struct() else {
        return TypeDescriptor::new(info, None, false, Vec::new(), NoCaseMap::new());
    };

    let immutable = is_immutable(shape);
    let constructor = if immutable {
        select_constructor(shape)
    } else {
        None
    };

    if let Some(constructor) = constructor {
        for param in constructor.params() {
            let getter = bind_getter(shape, param);
            discovered.push(param.name(), |ordinal| {
                PropertyDescriptor::from_param(param, ordinal, getter)
            });
        }
    }

    for member in shape.members() {
        if member.is_public_readable() {
            discovered.push(member.name(), |ordinal| {
                PropertyDescriptor::from_member(member, ordinal)
            });
        }
    }

    trace!(
        "discovered {} properties of `{}` (immutable: {immutable}, constructor arity: {:?})",
        discovered.properties.len(),
        info.type_path(),
        constructor.map(ConstructorInfo::arity),
    );

    let Discovered {
        properties,
        by_name,
    } = discovered;
    TypeDescriptor::new(info, constructor, immutable, properties, by_name)
}

#[cfg(test)]
mod tests {
    use crate::derive::Shape;
    use crate::describe::{TypeDescriptor, describe_of};
    use crate::impls::NonGenericTypeInfoCell;
    use crate::info::{Access, MemberInfo, PropertyType, StructInfo, TypeInfo, TypeKind, Typed};
    use crate::value::{Property, Value};

    fn names(descriptor: &TypeDescriptor) -> Vec<&'static str> {
        descriptor.properties().iter().map(|p| p.name()).collect()
    }

    #[derive(Shape, Clone, Debug, Default)]
    #[shape(default)]
    struct Mutable {
        pub id: i64,
        #[shape(get, set)]
        title: String,
        #[shape(get)]
        created: i32,
        pub tags: Vec<String>,
        pub rating: Option<f64>,
        hidden: u8,
    }

    #[test]
    fn mutable_member_walk() {
        let descriptor = describe_of::<Mutable>();
        assert!(!descriptor.is_immutable());
        assert!(descriptor.constructor().is_none());
        assert_eq!(names(descriptor), ["id", "title", "created", "tags", "rating"]);

        let created = descriptor.property("Created").unwrap();
        assert!(created.is_read_only());
        assert!(created.has_getter());

        let title = descriptor.property("TITLE").unwrap();
        assert!(!title.is_read_only());
        assert_eq!(title.property_type(), PropertyType::String);

        let tags = descriptor.property("tags").unwrap();
        assert!(tags.is_array());
        assert!(tags.declared_type().is::<String>());
        assert!(tags.member_type().is::<Vec<String>>());
        assert_eq!(tags.property_type(), PropertyType::String);

        let rating = descriptor.property("rating").unwrap();
        assert!(!rating.is_array());
        assert!(rating.is_number());
        assert_eq!(rating.property_type(), PropertyType::Double);
        assert!(rating.default_value().is_none());

        assert!(descriptor.property("hidden").is_none());
    }

    #[derive(Shape, Clone, Debug)]
    #[shape(
        constructor(single(x: i32)),
        constructor(forward(x: i32, y: i32)),
        constructor(backward(y: i32, x: i32))
    )]
    struct Tie {
        #[shape(get)]
        x: i32,
        #[shape(get)]
        y: i32,
    }

    impl Tie {
        fn single(x: i32) -> Self {
            Self { x, y: 0 }
        }

        fn forward(x: i32, y: i32) -> Self {
            Self { x, y }
        }

        fn backward(y: i32, x: i32) -> Self {
            Self { x, y }
        }
    }

    #[test]
    fn constructor_tie_picks_first_declared() {
        let _ = (Tie::single(1), Tie::backward(1, 2));
        let descriptor = describe_of::<Tie>();
        assert!(descriptor.is_immutable());
        assert_eq!(descriptor.constructor().map(|c| c.arity()), Some(2));
        assert_eq!(names(descriptor), ["x", "y"]);
        assert!(descriptor.properties().iter().all(|p| p.is_read_only()));
        assert_eq!(descriptor.property("y").unwrap().parameter_position(), Some(1));

        let value = Tie::forward(3, 4);
        let y = descriptor.property("y").unwrap().get(&value).unwrap();
        assert_eq!(y.downcast_ref::<i32>(), Some(&4));
    }

    #[derive(Shape, Clone, Debug)]
    #[shape(constructor(new(code: String, weight: u32 = 10, note: Option<String>)))]
    struct Parcel {
        #[shape(get, rename = "Code")]
        code: String,
        #[shape(get)]
        weight: i64,
        #[shape(get)]
        extra: bool,
    }

    impl Parcel {
        fn new(code: String, weight: u32, note: Option<String>) -> Self {
            let _ = note;
            Self {
                code,
                weight: i64::from(weight),
                extra: true,
            }
        }
    }

    #[test]
    fn constructor_parameters_bind_getters() {
        let descriptor = describe_of::<Parcel>();
        assert_eq!(names(descriptor), ["code", "weight", "note", "extra"]);

        let parcel = Parcel::new("P-1".to_string(), 3, None);

        // Bound by case-insensitive name to the renamed member.
        let code = descriptor.property("code").unwrap();
        assert!(code.has_getter());
        let value = code.get(&parcel).unwrap();
        assert_eq!(value.downcast_ref::<String>().map(String::as_str), Some("P-1"));

        // Same name, different type: not bound, reads the declared default.
        let weight = descriptor.property("weight").unwrap();
        assert!(!weight.has_getter());
        assert_eq!(weight.get(&parcel).unwrap().downcast_ref::<u32>(), Some(&10));

        // No member at all: reads the zero value of the parameter type.
        let note = descriptor.property("note").unwrap();
        assert!(!note.has_getter());
        assert!(note.get(&parcel).is_none());

        // Members not covered by the constructor follow.
        let extra = descriptor.property("extra").unwrap();
        assert_eq!(extra.ordinal(), 3);
        assert!(extra.parameter_position().is_none());
        assert!(extra.is_read_only());
    }

    #[derive(Shape, Clone, Debug, Default)]
    #[shape(default, constructor(new(value: i32)))]
    struct Settable {
        pub value: i32,
    }

    impl Settable {
        fn new(value: i32) -> Self {
            Self { value }
        }
    }

    #[test]
    fn constructors_of_mutable_types_are_ignored() {
        let _ = Settable::new(0);
        let descriptor = describe_of::<Settable>();
        assert!(!descriptor.is_immutable());
        assert!(descriptor.constructor().is_none());
        assert!(!descriptor.property("value").unwrap().is_read_only());
    }

    #[derive(Shape, Clone, Debug)]
    #[shape(constructor(new(id: u8)))]
    struct PrivateSetter {
        #[shape(get, private_set)]
        id: u8,
        #[shape(read_only)]
        pub label: String,
    }

    impl PrivateSetter {
        fn new(id: u8) -> Self {
            Self {
                id,
                label: String::new(),
            }
        }
    }

    #[test]
    fn non_public_setters_and_read_only_fields_are_immutable() {
        let _ = PrivateSetter::new(0);
        let descriptor = describe_of::<PrivateSetter>();
        assert!(descriptor.is_immutable());
        assert_eq!(names(descriptor), ["id", "label"]);
        assert!(descriptor.property("label").unwrap().is_read_only());
    }

    // Accessor shapes the derive does not produce.
    #[derive(Clone, Debug, Default)]
    struct Handmade {
        id: i32,
        name: String,
    }

    impl Typed for Handmade {
        fn type_info() -> &'static TypeInfo {
            static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
            CELL.get_or_init(|| {
                TypeInfo::new::<Self>(TypeKind::Struct(
                    StructInfo::new(vec![
                        MemberInfo::property::<i32>("Id", Access::Public, Access::Public)
                            .with_getter(|v| {
                                v.downcast_ref::<Self>()
                                    .map(|s| Box::new(s.id) as Box<dyn Value>)
                            })
                            .with_setter(|v, value| {
                                match (v.downcast_mut::<Self>(), i32::from_value(value)) {
                                    (Some(s), Some(id)) => {
                                        s.id = id;
                                        true
                                    }
                                    _ => false,
                                }
                            }),
                        MemberInfo::property::<String>("Item", Access::Public, Access::Public)
                            .indexed(),
                        MemberInfo::property::<String>("Secret", Access::NonPublic, Access::None),
                        MemberInfo::property::<String>("Sink", Access::None, Access::Public),
                        MemberInfo::field::<String>("internal", false, false),
                        MemberInfo::field::<String>("name", true, false).with_getter(|v| {
                            v.downcast_ref::<Self>()
                                .map(|s| Box::new(s.name.clone()) as Box<dyn Value>)
                        }),
                        MemberInfo::field::<i64>("ID", true, false),
                    ])
                    .with_activator(|| Box::new(Self::default()) as Box<dyn Value>),
                ))
            })
        }
    }

    impl Value for Handmade {
        fn value_info(&self) -> &'static TypeInfo {
            Self::type_info()
        }

        fn clone_value(&self) -> Box<dyn Value> {
            Box::new(self.clone())
        }
    }

    impl Property for Handmade {}

    #[test]
    fn member_walk_filters_accessors() {
        let descriptor = describe_of::<Handmade>();
        assert!(!descriptor.is_immutable());
        // Indexed, non-public and write-only members are skipped, and the
        // duplicate `ID` loses to the first-seen `Id`.
        assert_eq!(names(descriptor), ["Id", "name"]);

        let id = descriptor.property("id").unwrap();
        assert!(id.declared_type().is::<i32>());

        let mut value = Handmade::default();
        assert!(id.set(&mut value, Some(&7_i32)));
        assert_eq!(value.id, 7);
        assert!(!id.set(&mut value, Some(&"7".to_string())));

        let name = descriptor.property("NAME").unwrap();
        assert!(!name.is_read_only());
        // Writable, but no setter is bound.
        assert!(!name.set(&mut value, Some(&"x".to_string())));
        assert_eq!(value.name, "");
    }

    #[test]
    fn non_struct_types_have_no_properties() {
        assert!(describe_of::<i32>().is_empty());
        assert!(describe_of::<Vec<String>>().is_empty());
        assert!(describe_of::<Option<Mutable>>().constructor().is_none());
    }
}
