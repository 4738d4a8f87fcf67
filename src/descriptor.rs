//! Declared parameter types and their compiled decode descriptors.
//!
//! A callback's signature is spelled with [`ParamType`], a closed recursive
//! description of each declared host type. Registration compiles every
//! `ParamType` into an immutable [`TypeDescriptor`] tree so that no type
//! classification happens at call time: the descriptor already knows whether
//! the target is a container, which capability an entity slot requires, and
//! how to construct the concrete map representation.
//!
//! Descriptors are built once per callback and shared read-only across all
//! of its invocations.

use rustc_hash::FxHashMap;

use crate::entity::Capability;
use crate::error::SignatureError;
use crate::host::HostMap;

/// Declared host type of one callback parameter.
///
/// This is the closed set of types the marshaler can decode into. `Opaque`
/// represents a host type outside that set, as emitted by a bindings
/// scanner for foreign types; it is rejected at registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamType {
    /// Unconstrained slot, accepts any wire value
    Any,
    /// `bool`
    Bool,
    /// `i32`
    I32,
    /// `i64`
    I64,
    /// `u32`
    U32,
    /// `u64`
    U64,
    /// `f64`
    F64,
    /// String
    Str,
    /// Array of the given element type
    Array(Box<ParamType>),
    /// String-keyed map; the key type is carried so that a mis-declared
    /// non-string key fails at decode time, matching the wire contract
    Dict {
        /// Declared key type (must be `Str` to ever decode)
        key: Box<ParamType>,
        /// Declared value type
        value: Box<ParamType>,
    },
    /// Entity reference with a capability constraint
    Entity(Capability),
    /// Native function reference
    Function,
    /// A host type the marshaler has no converter for; always rejected
    Opaque(&'static str),
}

impl ParamType {
    /// Name used in registration errors.
    pub fn type_name(&self) -> String {
        match self {
            ParamType::Any => "any".into(),
            ParamType::Bool => "bool".into(),
            ParamType::I32 => "i32".into(),
            ParamType::I64 => "i64".into(),
            ParamType::U32 => "u32".into(),
            ParamType::U64 => "u64".into(),
            ParamType::F64 => "f64".into(),
            ParamType::Str => "string".into(),
            ParamType::Array(elem) => format!("array<{}>", elem.type_name()),
            ParamType::Dict { key, value } => {
                format!("dict<{}, {}>", key.type_name(), value.type_name())
            }
            ParamType::Entity(cap) => format!("entity<{:?}>", cap),
            ParamType::Function => "function".into(),
            ParamType::Opaque(name) => (*name).into(),
        }
    }
}

/// Classification driving decoder selection; one decode routine per class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamClass {
    /// Unconstrained
    Any,
    /// Boolean
    Bool,
    /// Signed 32-bit
    I32,
    /// Signed 64-bit
    I64,
    /// Unsigned 32-bit
    U32,
    /// Unsigned 64-bit
    U64,
    /// Float
    F64,
    /// String
    Str,
    /// Array
    List,
    /// String-keyed map
    Map,
    /// Entity reference
    Entity,
    /// Function reference
    Function,
}

/// Container shape of a decode target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Container {
    /// Not a container
    #[default]
    None,
    /// Array target
    List,
    /// String-keyed map target
    Map,
}

/// Compiled, immutable description of one decode target.
///
/// Built once per distinct declared type during callback registration and
/// shared read-only afterwards. A `Map` descriptor always carries both
/// generic-argument descriptors (key and value) plus the cached constructor
/// for the concrete map representation.
#[derive(Debug)]
pub struct TypeDescriptor {
    class: ParamClass,
    container: Container,
    element: Option<Box<TypeDescriptor>>,
    map_key: Option<Box<TypeDescriptor>>,
    map_value: Option<Box<TypeDescriptor>>,
    capability: Capability,
    map_factory: Option<fn() -> HostMap>,
}

impl TypeDescriptor {
    /// Compile a declared type into its descriptor tree.
    ///
    /// Fails only on [`ParamType::Opaque`], anywhere in the tree; every
    /// other shape is decodable (a mis-declared dict key is a decode-time
    /// rejection, not a registration failure).
    pub fn compile(ty: &ParamType) -> Result<Self, SignatureError> {
        match ty {
            ParamType::Any => Ok(Self::leaf(ParamClass::Any)),
            ParamType::Bool => Ok(Self::leaf(ParamClass::Bool)),
            ParamType::I32 => Ok(Self::leaf(ParamClass::I32)),
            ParamType::I64 => Ok(Self::leaf(ParamClass::I64)),
            ParamType::U32 => Ok(Self::leaf(ParamClass::U32)),
            ParamType::U64 => Ok(Self::leaf(ParamClass::U64)),
            ParamType::F64 => Ok(Self::leaf(ParamClass::F64)),
            ParamType::Str => Ok(Self::leaf(ParamClass::Str)),
            ParamType::Function => Ok(Self::leaf(ParamClass::Function)),
            ParamType::Entity(cap) => Ok(TypeDescriptor {
                capability: *cap,
                ..Self::leaf(ParamClass::Entity)
            }),
            ParamType::Array(elem) => {
                let element = TypeDescriptor::compile(elem)?;
                Ok(TypeDescriptor {
                    class: ParamClass::List,
                    container: Container::List,
                    element: Some(Box::new(element)),
                    ..Self::leaf(ParamClass::List)
                })
            }
            ParamType::Dict { key, value } => {
                let map_key = TypeDescriptor::compile(key)?;
                let map_value = TypeDescriptor::compile(value)?;
                let map_factory = map_factory_for(map_value.class);
                Ok(TypeDescriptor {
                    class: ParamClass::Map,
                    container: Container::Map,
                    map_key: Some(Box::new(map_key)),
                    map_value: Some(Box::new(map_value)),
                    map_factory: Some(map_factory),
                    ..Self::leaf(ParamClass::Map)
                })
            }
            ParamType::Opaque(name) => Err(SignatureError::UnsupportedParameter {
                index: 0,
                type_name: (*name).to_string(),
            }),
        }
    }

    /// The unconstrained descriptor, used for bare element slots.
    pub(crate) fn any() -> Self {
        Self::leaf(ParamClass::Any)
    }

    fn leaf(class: ParamClass) -> Self {
        TypeDescriptor {
            class,
            container: Container::None,
            element: None,
            map_key: None,
            map_value: None,
            capability: Capability::Any,
            map_factory: None,
        }
    }

    /// Classification of this target.
    pub fn class(&self) -> ParamClass {
        self.class
    }

    /// Container shape of this target.
    pub fn container(&self) -> Container {
        self.container
    }

    /// Element descriptor of an array target.
    pub fn element(&self) -> Option<&TypeDescriptor> {
        self.element.as_deref()
    }

    /// Key descriptor of a map target.
    pub fn map_key(&self) -> Option<&TypeDescriptor> {
        self.map_key.as_deref()
    }

    /// Value descriptor of a map target.
    pub fn map_value(&self) -> Option<&TypeDescriptor> {
        self.map_value.as_deref()
    }

    /// Capability constraint of an entity target.
    pub fn capability(&self) -> Capability {
        self.capability
    }

    /// Construct the concrete empty map for a map target.
    pub fn new_map(&self) -> Option<HostMap> {
        self.map_factory.map(|factory| factory())
    }
}

// One cached constructor per value class; chosen once at compile time so the
// decode loop never re-dispatches on the value type to pick a map shape.
fn map_factory_for(value_class: ParamClass) -> fn() -> HostMap {
    match value_class {
        ParamClass::Bool => || HostMap::Bool(FxHashMap::default()),
        ParamClass::I32 => || HostMap::I32(FxHashMap::default()),
        ParamClass::I64 => || HostMap::I64(FxHashMap::default()),
        ParamClass::U32 => || HostMap::U32(FxHashMap::default()),
        ParamClass::U64 => || HostMap::U64(FxHashMap::default()),
        ParamClass::F64 => || HostMap::F64(FxHashMap::default()),
        ParamClass::Str => || HostMap::Str(FxHashMap::default()),
        _ => || HostMap::Object(FxHashMap::default()),
    }
}
