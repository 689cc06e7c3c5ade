//! Entity schemas declared at compile time
//!
//! Every hydratable type carries a static table of [`FieldDescriptor`]s built
//! by the [`entity!`](crate::entity) macro. Field type constraints come from
//! the Rust type of each field through [`FieldKind`]: `Option<T>` makes a
//! field nullable, [`Number`] and [`Identifier`] are sum types, [`Shared<C>`]
//! accepts any entity declaring capability `C`, and [`FieldValue`] leaves a
//! field untyped.

use super::hydrator::hydrate;
use super::record::RawRecord;
use super::report::Hydrated;
use super::value::{FieldValue, Identifier, Number, TypeTag};
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::any::Any;
use std::fmt::{self, Debug};
use std::marker::PhantomData;
use std::ops::Deref;
use std::sync::Arc;

/// Shared handle to a hydrated entity of any type
pub type EntityRef = Arc<dyn DynEntity>;

// =============================================================================
// Field Descriptors
// =============================================================================

/// Type constraint declared for a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeConstraint {
    /// Any value is accepted
    Untyped,
    /// Values must satisfy one of `accepts`; null only if `nullable`
    Typed {
        accepts: &'static [TypeTag],
        nullable: bool,
    },
}

impl TypeConstraint {
    /// Derive the constraint from a field's Rust type
    pub const fn of<T: FieldKind>() -> Self {
        if T::UNTYPED {
            TypeConstraint::Untyped
        } else {
            TypeConstraint::Typed {
                accepts: T::TAGS,
                nullable: T::NULLABLE,
            }
        }
    }

    pub fn is_nullable(&self) -> bool {
        match self {
            TypeConstraint::Untyped => true,
            TypeConstraint::Typed { nullable, .. } => *nullable,
        }
    }

    /// Accepted type tags (empty when untyped)
    pub fn accepted_types(&self) -> &'static [TypeTag] {
        match self {
            TypeConstraint::Untyped => &[],
            TypeConstraint::Typed { accepts, .. } => accepts,
        }
    }
}

/// Name and type constraint of one settable field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    /// Upstream record key, used verbatim (e.g. `stationId`, `gyldig_fra`)
    pub key: &'static str,
    /// Rust field name
    pub field: &'static str,
    pub constraint: TypeConstraint,
}

impl FieldDescriptor {
    pub const fn new<T: FieldKind>(key: &'static str, field: &'static str) -> Self {
        Self {
            key,
            field,
            constraint: TypeConstraint::of::<T>(),
        }
    }

    pub fn is_nullable(&self) -> bool {
        self.constraint.is_nullable()
    }
}

// =============================================================================
// Field Kinds
// =============================================================================

/// Mapping between a Rust field type and loosely-typed values
///
/// `from_value` is only called after the type checker accepted the value;
/// returning `None` reports the value as unconvertible (e.g. a list whose
/// elements do not fit the element type).
pub trait FieldKind: Sized {
    /// Type tags this field accepts
    const TAGS: &'static [TypeTag];
    const NULLABLE: bool = false;
    const UNTYPED: bool = false;

    fn from_value(value: &FieldValue) -> Option<Self>;
    fn to_value(&self) -> FieldValue;
}

impl FieldKind for String {
    const TAGS: &'static [TypeTag] = &[TypeTag::String];

    fn from_value(value: &FieldValue) -> Option<Self> {
        value.as_str().map(str::to_string)
    }

    fn to_value(&self) -> FieldValue {
        FieldValue::String(self.clone())
    }
}

impl FieldKind for i64 {
    const TAGS: &'static [TypeTag] = &[TypeTag::Int];

    fn from_value(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    fn to_value(&self) -> FieldValue {
        FieldValue::Int(*self)
    }
}

impl FieldKind for f64 {
    const TAGS: &'static [TypeTag] = &[TypeTag::Float];

    fn from_value(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    fn to_value(&self) -> FieldValue {
        FieldValue::Float(*self)
    }
}

impl FieldKind for bool {
    const TAGS: &'static [TypeTag] = &[TypeTag::Bool];

    fn from_value(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    fn to_value(&self) -> FieldValue {
        FieldValue::Bool(*self)
    }
}

impl FieldKind for Number {
    const TAGS: &'static [TypeTag] = &[TypeTag::Int, TypeTag::Float];

    fn from_value(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::Int(i) => Some(Number::Int(*i)),
            FieldValue::Float(f) => Some(Number::Float(*f)),
            _ => None,
        }
    }

    fn to_value(&self) -> FieldValue {
        match self {
            Number::Int(i) => FieldValue::Int(*i),
            Number::Float(f) => FieldValue::Float(*f),
        }
    }
}

impl FieldKind for Identifier {
    const TAGS: &'static [TypeTag] = &[TypeTag::String, TypeTag::Int];

    fn from_value(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::String(s) => Some(Identifier::Text(s.clone())),
            FieldValue::Int(i) => Some(Identifier::Numeric(*i)),
            _ => None,
        }
    }

    fn to_value(&self) -> FieldValue {
        match self {
            Identifier::Text(s) => FieldValue::String(s.clone()),
            Identifier::Numeric(i) => FieldValue::Int(*i),
        }
    }
}

impl FieldKind for FieldValue {
    const TAGS: &'static [TypeTag] = &[];
    const NULLABLE: bool = true;
    const UNTYPED: bool = true;

    fn from_value(value: &FieldValue) -> Option<Self> {
        Some(value.clone())
    }

    fn to_value(&self) -> FieldValue {
        self.clone()
    }
}

impl FieldKind for IndexMap<String, FieldValue> {
    const TAGS: &'static [TypeTag] = &[TypeTag::Map];

    fn from_value(value: &FieldValue) -> Option<Self> {
        value.as_map().cloned()
    }

    fn to_value(&self) -> FieldValue {
        FieldValue::Map(self.clone())
    }
}

impl<T: FieldKind> FieldKind for Vec<T> {
    const TAGS: &'static [TypeTag] = &[TypeTag::List];

    fn from_value(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::List(items) => items.iter().map(T::from_value).collect(),
            _ => None,
        }
    }

    fn to_value(&self) -> FieldValue {
        FieldValue::List(self.iter().map(FieldKind::to_value).collect())
    }
}

impl<T: FieldKind> FieldKind for Option<T> {
    const TAGS: &'static [TypeTag] = T::TAGS;
    const NULLABLE: bool = true;
    const UNTYPED: bool = T::UNTYPED;

    fn from_value(value: &FieldValue) -> Option<Self> {
        if value.is_null() {
            Some(None)
        } else {
            T::from_value(value).map(Some)
        }
    }

    fn to_value(&self) -> FieldValue {
        match self {
            Some(inner) => inner.to_value(),
            None => FieldValue::Null,
        }
    }
}

// =============================================================================
// Capabilities
// =============================================================================

/// Marker for an interface-like type that several entities can declare
///
/// A field typed [`Shared<C>`] accepts any entity whose type set contains
/// `C::NAME`, whatever its concrete type.
pub trait Capability: 'static {
    const NAME: &'static str;
}

/// Entity handle constrained to entities declaring capability `C`
pub struct Shared<C: Capability> {
    entity: EntityRef,
    _capability: PhantomData<fn() -> C>,
}

impl<C: Capability> Shared<C> {
    /// Wrap an entity, or return `None` if it does not declare `C`
    pub fn new(entity: EntityRef) -> Option<Self> {
        if entity.implements(C::NAME) {
            Some(Self {
                entity,
                _capability: PhantomData,
            })
        } else {
            None
        }
    }

    pub fn entity(&self) -> &EntityRef {
        &self.entity
    }

    /// Access the concrete entity behind the capability
    pub fn downcast_ref<E: Entity>(&self) -> Option<&E> {
        self.entity.downcast_ref::<E>()
    }
}

impl<C: Capability> Clone for Shared<C> {
    fn clone(&self) -> Self {
        Self {
            entity: Arc::clone(&self.entity),
            _capability: PhantomData,
        }
    }
}

impl<C: Capability> Debug for Shared<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Shared")
            .field(&C::NAME)
            .field(&self.entity)
            .finish()
    }
}

impl<C: Capability> PartialEq for Shared<C> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.entity, &other.entity)
            || (self.entity.type_name() == other.entity.type_name()
                && self.entity.to_map() == other.entity.to_map())
    }
}

impl<C: Capability> Deref for Shared<C> {
    type Target = dyn DynEntity;

    fn deref(&self) -> &Self::Target {
        self.entity.as_ref()
    }
}

impl<C: Capability> FieldKind for Shared<C> {
    const TAGS: &'static [TypeTag] = &[TypeTag::Named(C::NAME)];

    fn from_value(value: &FieldValue) -> Option<Self> {
        value.as_object().and_then(|entity| Self::new(Arc::clone(entity)))
    }

    fn to_value(&self) -> FieldValue {
        FieldValue::Object(Arc::clone(&self.entity))
    }
}

// =============================================================================
// Entities
// =============================================================================

/// A hydratable domain type with a statically declared schema
///
/// Implemented through the [`entity!`](crate::entity) macro; the generic
/// hydrator drives `FIELDS`, `get_field` and `set_field` without any
/// per-entity logic.
pub trait Entity: Any + Debug + Clone + Default + Send + Sync {
    /// Concrete type tag
    const NAME: &'static str;

    /// Own type followed by every declared capability
    const TYPE_SET: &'static [&'static str];

    /// Settable fields in declaration order
    const FIELDS: &'static [FieldDescriptor];

    /// Current value of the field stored under `key`
    fn get_field(&self, key: &str) -> Option<FieldValue>;

    /// Store an already-accepted value; `false` if it cannot be converted
    fn set_field(&mut self, key: &str, value: &FieldValue) -> bool;

    /// Hydrate a default instance from a record
    fn from_record(record: &RawRecord) -> Hydrated<Self> {
        let mut entity = Self::default();
        let report = hydrate(&mut entity, record);
        Hydrated::new(entity, report)
    }

    fn into_shared(self) -> EntityRef {
        Arc::new(self)
    }
}

/// Object-safe view of any entity
pub trait DynEntity: Any + Debug + Send + Sync {
    fn type_name(&self) -> &'static str;

    fn type_set(&self) -> &'static [&'static str];

    fn descriptors(&self) -> &'static [FieldDescriptor];

    fn field_value(&self, key: &str) -> Option<FieldValue>;

    fn as_any(&self) -> &dyn Any;

    /// Check whether the entity's type set contains `name`
    fn implements(&self, name: &str) -> bool {
        self.type_set().contains(&name)
    }

    /// Every field's current value keyed by its record key
    fn to_map(&self) -> IndexMap<String, FieldValue> {
        self.descriptors()
            .iter()
            .filter_map(|descriptor| {
                self.field_value(descriptor.key)
                    .map(|value| (descriptor.key.to_string(), value))
            })
            .collect()
    }
}

impl<E: Entity> DynEntity for E {
    fn type_name(&self) -> &'static str {
        E::NAME
    }

    fn type_set(&self) -> &'static [&'static str] {
        E::TYPE_SET
    }

    fn descriptors(&self) -> &'static [FieldDescriptor] {
        E::FIELDS
    }

    fn field_value(&self, key: &str) -> Option<FieldValue> {
        self.get_field(key)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl dyn DynEntity {
    pub fn downcast_ref<E: Entity>(&self) -> Option<&E> {
        self.as_any().downcast_ref::<E>()
    }

    pub fn is<E: Entity>(&self) -> bool {
        self.as_any().is::<E>()
    }
}

impl Serialize for dyn DynEntity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_map().serialize(serializer)
    }
}

// =============================================================================
// Reflection
// =============================================================================

/// Settable fields of `E` in declaration order
///
/// The table is a compile-time constant, so repeated calls cost nothing and
/// a type without fields yields an empty slice.
pub fn reflect<E: Entity>() -> &'static [FieldDescriptor] {
    E::FIELDS
}

/// Serializable description of an entity type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntitySchema {
    pub name: &'static str,
    pub type_set: &'static [&'static str],
    pub fields: &'static [FieldDescriptor],
}

impl EntitySchema {
    pub fn of<E: Entity>() -> Self {
        Self {
            name: E::NAME,
            type_set: E::TYPE_SET,
            fields: E::FIELDS,
        }
    }

    pub fn of_dyn(entity: &dyn DynEntity) -> Self {
        Self {
            name: entity.type_name(),
            type_set: entity.type_set(),
            fields: entity.descriptors(),
        }
    }

    /// Look up a field by record key
    pub fn field(&self, key: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|descriptor| descriptor.key == key)
    }
}

/// Declare a hydratable entity
///
/// Generates the struct, its [`Entity`] implementation (schema table,
/// field accessors) and a [`FieldKind`] implementation so the entity can be
/// nested in other entities. Each field names the upstream record key it is
/// read from. Capabilities listed after `implements` join the type set.
///
/// ```
/// use dmi_processor::entity;
/// use dmi_processor::app::services::hydration::{Entity, RawRecord};
///
/// entity! {
///     /// A named place
///     pub struct Place {
///         pub name: Option<String> => "navn",
///         pub height: Option<f64> => "hoejde",
///     }
/// }
///
/// let record = RawRecord::new().with("navn", "Skagen").with("hoejde", 3.5);
/// let place = Place::from_record(&record).entity;
/// assert_eq!(place.name.as_deref(), Some("Skagen"));
/// assert_eq!(place.height, Some(3.5));
/// ```
#[macro_export]
macro_rules! entity {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident $(implements [$($capability:ident),* $(,)?])? {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty => $key:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $ty,
            )*
        }

        impl $crate::app::services::hydration::Entity for $name {
            const NAME: &'static str = stringify!($name);

            const TYPE_SET: &'static [&'static str] = &[
                stringify!($name),
                $($(<$capability as $crate::app::services::hydration::Capability>::NAME,)*)?
            ];

            const FIELDS: &'static [$crate::app::services::hydration::FieldDescriptor] = &[
                $($crate::app::services::hydration::FieldDescriptor::new::<$ty>($key, stringify!($field)),)*
            ];

            fn get_field(&self, key: &str) -> Option<$crate::app::services::hydration::FieldValue> {
                match key {
                    $($key => Some($crate::app::services::hydration::FieldKind::to_value(&self.$field)),)*
                    _ => None,
                }
            }

            #[allow(unused_variables)]
            fn set_field(
                &mut self,
                key: &str,
                value: &$crate::app::services::hydration::FieldValue,
            ) -> bool {
                match key {
                    $($key => match <$ty as $crate::app::services::hydration::FieldKind>::from_value(value) {
                        Some(converted) => {
                            self.$field = converted;
                            true
                        }
                        None => false,
                    },)*
                    _ => false,
                }
            }
        }

        impl $crate::app::services::hydration::FieldKind for $name {
            const TAGS: &'static [$crate::app::services::hydration::TypeTag] =
                &[$crate::app::services::hydration::TypeTag::Named(stringify!($name))];

            fn from_value(value: &$crate::app::services::hydration::FieldValue) -> Option<Self> {
                value
                    .as_object()
                    .and_then(|entity| entity.downcast_ref::<$name>())
                    .cloned()
            }

            fn to_value(&self) -> $crate::app::services::hydration::FieldValue {
                $crate::app::services::hydration::FieldValue::Object(::std::sync::Arc::new(self.clone()))
            }
        }
    };
}
