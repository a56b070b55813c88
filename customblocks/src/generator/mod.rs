pub mod adapter;
pub mod context;
pub mod output;
pub mod registry;
pub mod signature;

use std::fmt;
use std::rc::Rc;

pub use adapter::{AdaptedCall, Slot, SlotKind, adapt};
pub use context::BlockContext;
pub use output::{Output, append_output};
pub use registry::{Export, GeneratorRef, Module, ModuleLoader, ModuleMap, Registry};
pub use signature::{FillMode, Param, ParamValue, Signature};

use crate::error::ConvertError;

/// Renders one custom block.
///
/// The signature is the generator's parameter table; header parameters are
/// bound against it before `generate` is called. The context is always
/// passed; declaring a context parameter only keeps it out of matching.
pub trait Generator {
    fn signature(&self) -> Signature;

    fn generate(
        &self,
        ctx: &mut BlockContext<'_>,
        call: AdaptedCall,
    ) -> Result<Output, ConvertError>;
}

type GenerateFn = dyn Fn(&mut BlockContext<'_>, AdaptedCall) -> Result<Output, ConvertError>;

/// A generator made from a signature and a closure.
pub struct FnGenerator {
    signature: Signature,
    func: Box<GenerateFn>,
}

impl FnGenerator {
    pub fn new<F>(signature: Signature, func: F) -> Self
    where
        F: Fn(&mut BlockContext<'_>, AdaptedCall) -> Result<Output, ConvertError> + 'static,
    {
        FnGenerator {
            signature,
            func: Box::new(func),
        }
    }

    pub fn into_rc(self) -> Rc<dyn Generator> {
        Rc::new(self)
    }
}

impl Generator for FnGenerator {
    fn signature(&self) -> Signature {
        self.signature.clone()
    }

    fn generate(
        &self,
        ctx: &mut BlockContext<'_>,
        call: AdaptedCall,
    ) -> Result<Output, ConvertError> {
        (self.func)(ctx, call)
    }
}

impl fmt::Debug for FnGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnGenerator")
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}
