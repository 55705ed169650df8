use std::collections::VecDeque;
use std::sync::Arc;

use crate::impls::GenericTypeInfoCell;
use crate::info::{SequenceInfo, SequenceShape, TypeInfo, TypeKind, Typed};
use crate::value::{Property, Value, unwrap_nullable};

/// Converts boxed items, null items included, into `T`.
fn collect_owned<T: Property>(items: Vec<Option<Box<dyn Value>>>) -> Option<Vec<T>> {
    items
        .iter()
        .map(|item| T::from_value(item.as_deref()))
        .collect()
}

/// Converts the items of another sequence into `T`.
fn collect_borrowed<T: Property>(value: Option<&dyn Value>) -> Option<Vec<T>> {
    unwrap_nullable(value)?
        .items()?
        .into_iter()
        .map(|item| T::from_value(Some(item)))
        .collect()
}

fn items_eq(items: &[&dyn Value], other: &dyn Value) -> Option<bool> {
    let other = other.items()?;
    if items.len() != other.len() {
        return Some(false);
    }
    for (a, b) in items.iter().zip(other) {
        if !a.value_eq(b)? {
            return Some(false);
        }
    }
    Some(true)
}

macro_rules! impl_sequence {
    (
        $ty:ty, [$($generics:tt)*], $shape:ident,
        zero: $zero:expr,
        build: |$items:ident| $build:expr
    ) => {
        impl<$($generics)*> Typed for $ty {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| {
                    let info = SequenceInfo::new(SequenceShape::$shape, T::type_info, |items| {
                        let $items = collect_owned::<T>(items)?;
                        $build.map(|value| Box::new(value) as Box<dyn Value>)
                    });
                    let info = TypeInfo::new::<Self>(TypeKind::Sequence(info));
                    match $zero {
                        Some(zero) => info.with_zero(zero),
                        None => info,
                    }
                })
            }
        }

        impl<$($generics)*> Value for $ty {
            #[inline]
            fn value_info(&self) -> &'static TypeInfo {
                <Self as Typed>::type_info()
            }

            #[inline]
            fn clone_value(&self) -> Box<dyn Value> {
                Box::new(self.clone())
            }

            fn value_eq(&self, other: &dyn Value) -> Option<bool> {
                if !other.is::<Self>() {
                    return Some(false);
                }
                let items = self.items()?;
                items_eq(&items, other)
            }

            fn items(&self) -> Option<Vec<&dyn Value>> {
                Some(self.iter().map(|item| item as &dyn Value).collect())
            }
        }

        impl<$($generics)*> Property for $ty {
            fn from_value(value: Option<&dyn Value>) -> Option<Self> {
                if let Some(exact) = unwrap_nullable(value)?.downcast_ref::<Self>() {
                    return Some(exact.clone());
                }
                let $items = collect_borrowed::<T>(value)?;
                $build
            }
        }
    };
}

type ZeroFn = Option<fn() -> Box<dyn Value>>;

impl_sequence!(
    Vec<T>, [T: Property], List,
    zero: ZeroFn::Some(|| Box::new(Vec::<T>::new()) as Box<dyn Value>),
    build: |items| Some(items)
);

impl_sequence!(
    VecDeque<T>, [T: Property], Sequence,
    zero: ZeroFn::Some(|| Box::new(VecDeque::<T>::new()) as Box<dyn Value>),
    build: |items| Some(VecDeque::from(items))
);

impl_sequence!(
    Box<[T]>, [T: Property], ReadOnlySequence,
    zero: ZeroFn::Some(|| Box::new(Vec::<T>::new().into_boxed_slice()) as Box<dyn Value>),
    build: |items| Some(items.into_boxed_slice())
);

impl_sequence!(
    Arc<[T]>, [T: Property], ReadOnlyList,
    zero: ZeroFn::Some(|| Box::new(Arc::<[T]>::from(Vec::new())) as Box<dyn Value>),
    build: |items| Some(Arc::<[T]>::from(items))
);

impl_sequence!(
    [T; N], [T: Property, const N: usize], Array,
    zero: ZeroFn::None,
    build: |items| <[T; N]>::try_from(items).ok()
);

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Arc;

    use crate::info::{SequenceShape, Typed};
    use crate::value::{Property, Value};

    #[test]
    fn shapes() {
        let shape = |info: &crate::info::TypeInfo| info.as_sequence().map(|s| s.shape());
        assert_eq!(shape(<[u8; 2]>::type_info()), Some(SequenceShape::Array));
        assert_eq!(shape(<Box<[u8]>>::type_info()), Some(SequenceShape::ReadOnlySequence));
        assert_eq!(shape(<Arc<[u8]>>::type_info()), Some(SequenceShape::ReadOnlyList));
        assert_eq!(shape(<VecDeque<u8>>::type_info()), Some(SequenceShape::Sequence));
        assert_eq!(shape(<Vec<u8>>::type_info()), Some(SequenceShape::List));
        assert!(<Vec<u8>>::type_info().as_sequence().unwrap().item().is::<u8>());
    }

    #[test]
    fn rebuild_between_shapes() {
        let source = vec![1_i32, 2, 3];
        assert_eq!(<[i32; 3]>::from_value(Some(&source)), Some([1, 2, 3]));
        assert_eq!(<[i32; 2]>::from_value(Some(&source)), None);
        assert_eq!(
            <VecDeque<i32>>::from_value(Some(&source)),
            Some(VecDeque::from([1, 2, 3]))
        );
        assert_eq!(<Vec<i64>>::from_value(Some(&source)), None);
    }

    #[test]
    fn nullable_items() {
        let source = vec![Some(1_u8), None];
        assert_eq!(<Vec<Option<u8>>>::from_value(Some(&source)), Some(source.clone()));
        assert_eq!(<Vec<u8>>::from_value(Some(&source)), None);
    }

    #[test]
    fn from_items() {
        let info = <Arc<[String]>>::type_info().as_sequence().unwrap();
        let value = info
            .from_items(vec![
                Some(Box::new("a".to_string()) as Box<dyn Value>),
                Some(Box::new("b".to_string()) as Box<dyn Value>),
            ])
            .unwrap();
        let value = value.take::<Arc<[String]>>().unwrap();
        assert_eq!(value.to_vec(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn equality() {
        let a: &dyn Value = &vec![1_u8, 2];
        assert_eq!(a.value_eq(&vec![1_u8, 2]), Some(true));
        assert_eq!(a.value_eq(&vec![1_u8]), Some(false));
        assert_eq!(a.value_eq(&[1_u8, 2]), Some(false));
    }
}
