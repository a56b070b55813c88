use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::Rc;

use super::Generator;
use crate::error::ResolveError;

/// A registry entry: a generator, or a `module:symbol` reference to one
/// that is looked up on first use.
#[derive(Clone)]
pub enum GeneratorRef {
    Direct(Rc<dyn Generator>),
    Symbolic(String),
}

impl GeneratorRef {
    pub fn symbolic(reference: impl Into<String>) -> Self {
        GeneratorRef::Symbolic(reference.into())
    }
}

impl<G: Generator + 'static> From<G> for GeneratorRef {
    fn from(generator: G) -> Self {
        GeneratorRef::Direct(Rc::new(generator))
    }
}

impl From<Rc<dyn Generator>> for GeneratorRef {
    fn from(generator: Rc<dyn Generator>) -> Self {
        GeneratorRef::Direct(generator)
    }
}

impl fmt::Debug for GeneratorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneratorRef::Direct(_) => f.write_str("Direct(..)"),
            GeneratorRef::Symbolic(reference) => write!(f, "Symbolic({:?})", reference),
        }
    }
}

/// Something a module makes available by name.
#[derive(Clone)]
pub enum Export {
    Generator(Rc<dyn Generator>),
    /// Any other named value. Referencing it as a generator is an error.
    Value(String),
}

/// A named table of exports that symbolic references point into.
#[derive(Clone, Default)]
pub struct Module {
    exports: BTreeMap<String, Export>,
}

impl Module {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generator(mut self, name: impl Into<String>, generator: impl Generator + 'static) -> Self {
        self.exports
            .insert(name.into(), Export::Generator(Rc::new(generator)));
        self
    }

    pub fn value(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.exports.insert(name.into(), Export::Value(value.into()));
        self
    }

    pub fn get(&self, name: &str) -> Option<&Export> {
        self.exports.get(name)
    }
}

/// Finds modules for symbolic references.
pub trait ModuleLoader {
    fn load(&self, module: &str) -> Option<Module>;
}

/// A loader backed by an in-memory map of module path to module.
#[derive(Clone, Default)]
pub struct ModuleMap {
    modules: HashMap<String, Module>,
}

impl ModuleMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_module(mut self, path: impl Into<String>, module: Module) -> Self {
        self.modules.insert(path.into(), module);
        self
    }
}

impl ModuleLoader for ModuleMap {
    fn load(&self, module: &str) -> Option<Module> {
        self.modules.get(module).cloned()
    }
}

/// Maps block types to generators.
///
/// Lookup order: caller overrides, then built-in bindings, then the fallback.
/// An override of `None` sends its type straight to the fallback.
pub struct Registry {
    builtins: HashMap<String, GeneratorRef>,
    overrides: HashMap<String, Option<GeneratorRef>>,
    fallback: GeneratorRef,
    loader: Box<dyn ModuleLoader>,
    resolved: RefCell<HashMap<String, Rc<dyn Generator>>>,
}

impl Registry {
    pub fn new(fallback: impl Into<GeneratorRef>) -> Self {
        Registry {
            builtins: HashMap::new(),
            overrides: HashMap::new(),
            fallback: fallback.into(),
            loader: Box::new(ModuleMap::new()),
            resolved: RefCell::new(HashMap::new()),
        }
    }

    pub fn with_loader(mut self, loader: impl ModuleLoader + 'static) -> Self {
        self.loader = Box::new(loader);
        self.resolved.get_mut().clear();
        self
    }

    /// Bind a built-in generator to a block type.
    pub fn register(&mut self, block_type: impl Into<String>, generator: impl Into<GeneratorRef>) {
        self.builtins.insert(block_type.into(), generator.into());
    }

    /// Caller-supplied binding, taking precedence over built-ins.
    pub fn override_type(&mut self, block_type: impl Into<String>, generator: Option<GeneratorRef>) {
        self.overrides.insert(block_type.into(), generator);
    }

    pub fn set_fallback(&mut self, fallback: impl Into<GeneratorRef>) {
        self.fallback = fallback.into();
    }

    /// Block types with a binding of their own, sorted.
    pub fn types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self
            .builtins
            .keys()
            .chain(self.overrides.iter().filter(|(_, g)| g.is_some()).map(|(k, _)| k))
            .map(String::as_str)
            .collect();
        types.sort_unstable();
        types.dedup();
        types
    }

    /// The generator for `block_type`.
    pub fn resolve(&self, block_type: &str) -> Result<Rc<dyn Generator>, ResolveError> {
        let entry = match self.overrides.get(block_type) {
            Some(Some(generator)) => generator,
            Some(None) => &self.fallback,
            None => self.builtins.get(block_type).unwrap_or(&self.fallback),
        };
        self.materialize(entry)
    }

    fn materialize(&self, entry: &GeneratorRef) -> Result<Rc<dyn Generator>, ResolveError> {
        let reference = match entry {
            GeneratorRef::Direct(generator) => return Ok(Rc::clone(generator)),
            GeneratorRef::Symbolic(reference) => reference,
        };

        if let Some(generator) = self.resolved.borrow().get(reference) {
            return Ok(Rc::clone(generator));
        }

        let (module_path, symbol) = reference
            .split_once(':')
            .ok_or_else(|| ResolveError::MissingSeparator(reference.clone()))?;

        let module = self
            .loader
            .load(module_path)
            .ok_or_else(|| ResolveError::ModuleNotFound(module_path.to_string()))?;

        let generator = match module.get(symbol) {
            Some(Export::Generator(generator)) => Rc::clone(generator),
            Some(Export::Value(_)) => {
                return Err(ResolveError::NotCallable {
                    module: module_path.to_string(),
                    symbol: symbol.to_string(),
                });
            }
            None => {
                return Err(ResolveError::AttributeNotFound {
                    module: module_path.to_string(),
                    symbol: symbol.to_string(),
                });
            }
        };

        log::debug!("resolved generator reference '{}'", reference);
        self.resolved
            .borrow_mut()
            .insert(reference.clone(), Rc::clone(&generator));
        Ok(generator)
    }
}
