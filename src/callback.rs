//! Compiled callable adapters over user functions.
//!
//! A [`Callback`] pairs one user-supplied handler with a per-parameter
//! (decoder, descriptor) pipeline compiled once at registration. Native
//! events fire at tick frequency, so all type classification is paid here,
//! never per invocation. A compiled callback holds no per-call mutable
//! state and is safe to share and invoke concurrently; only the entity pool
//! behind the [`Context`] constrains threading.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::context::Context;
use crate::decode::{decoder_for, Decoder};
use crate::descriptor::{ParamClass, ParamType, TypeDescriptor};
use crate::encode::encode;
use crate::entity::{Capability, EntityHandle};
use crate::error::SignatureError;
use crate::host::HostValue;
use crate::value::Value;

/// A user-supplied function invocable with decoded host arguments.
///
/// Implemented for any matching closure. Return `None` from a void handler;
/// value-producing handlers return `Some` and the result is encoded back to
/// the wire.
pub trait CallbackHandler: Send + Sync {
    /// Invoke with positional decoded arguments.
    fn call(&self, args: &[HostValue]) -> Option<HostValue>;
}

impl<F> CallbackHandler for F
where
    F: Fn(&[HostValue]) -> Option<HostValue> + Send + Sync,
{
    fn call(&self, args: &[HostValue]) -> Option<HostValue> {
        (self)(args)
    }
}

/// Whether a callback produces a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReturnKind {
    /// Handler result is discarded; invocation always returns `Nil`
    #[default]
    Void,
    /// Handler result is encoded back onto the wire
    Value,
}

struct CompiledParam {
    decoder: Decoder,
    descriptor: TypeDescriptor,
}

/// One user function plus its compiled per-parameter decode pipeline.
pub struct Callback {
    params: Box<[CompiledParam]>,
    returns: ReturnKind,
    handler: Arc<dyn CallbackHandler>,
}

impl Callback {
    /// Compile a callback from its declared signature.
    ///
    /// Classifies every parameter, builds its descriptor tree, and selects
    /// its decode routine. Any parameter outside the marshalable set
    /// rejects the whole registration; an invocable callback with an
    /// unsupported signature never exists.
    pub fn compile<H>(
        params: &[ParamType],
        returns: ReturnKind,
        handler: H,
    ) -> Result<Self, SignatureError>
    where
        H: CallbackHandler + 'static,
    {
        let mut compiled = Vec::with_capacity(params.len());
        for (index, param) in params.iter().enumerate() {
            let descriptor = TypeDescriptor::compile(param).map_err(|_| {
                let err = SignatureError::UnsupportedParameter {
                    index,
                    type_name: param.type_name(),
                };
                warn!(%err, "callback registration rejected");
                err
            })?;
            compiled.push(CompiledParam {
                decoder: decoder_for(descriptor.class()),
                descriptor,
            });
        }
        Ok(Callback {
            params: compiled.into_boxed_slice(),
            returns,
            handler: Arc::new(handler),
        })
    }

    /// Declared parameter count.
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Whether this callback produces a value.
    pub fn return_kind(&self) -> ReturnKind {
        self.returns
    }

    /// Invoke with the plain convention: one wire argument per parameter.
    ///
    /// Arity skew and top-level decode mismatches return `Nil` without
    /// running the handler; the native side cannot distinguish that from a
    /// function that returned nothing, by design.
    pub fn invoke(&self, ctx: &Context, args: &[Value]) -> Value {
        if args.len() != self.params.len() {
            debug!(
                expected = self.params.len(),
                got = args.len(),
                "argument count mismatch, dropping invocation"
            );
            return Value::Nil;
        }
        let mut decoded = Vec::with_capacity(args.len());
        for (param, value) in self.params.iter().zip(args) {
            match (param.decoder)(value, &param.descriptor, ctx) {
                Some(host) => decoded.push(host),
                None => {
                    debug!(
                        expected = ?param.descriptor.class(),
                        got = value.type_name(),
                        "parameter decode mismatch, dropping invocation"
                    );
                    return Value::Nil;
                }
            }
        }
        self.finish(self.handler.call(&decoded))
    }

    /// Invoke with the actor-prefixed convention used by per-player events.
    ///
    /// Parameter 0 must be a player-capability entity and receives the
    /// triggering actor directly, without decoding; the wire arguments fill
    /// the remaining parameters. Any violation returns `Nil`.
    pub fn invoke_with_actor(
        &self,
        ctx: &Context,
        actor: Arc<dyn EntityHandle>,
        args: &[Value],
    ) -> Value {
        if args.len() + 1 != self.params.len() {
            debug!(
                expected = self.params.len(),
                got = args.len() + 1,
                "argument count mismatch, dropping invocation"
            );
            return Value::Nil;
        }
        let first = &self.params[0].descriptor;
        if first.class() != ParamClass::Entity || first.capability() != Capability::Player {
            debug!("actor-prefixed invocation requires a player-capability first parameter");
            return Value::Nil;
        }
        let mut decoded = Vec::with_capacity(args.len() + 1);
        decoded.push(HostValue::Entity(actor));
        for (param, value) in self.params[1..].iter().zip(args) {
            match (param.decoder)(value, &param.descriptor, ctx) {
                Some(host) => decoded.push(host),
                None => return Value::Nil,
            }
        }
        self.finish(self.handler.call(&decoded))
    }

    fn finish(&self, result: Option<HostValue>) -> Value {
        match self.returns {
            ReturnKind::Void => Value::Nil,
            ReturnKind::Value => result
                .as_ref()
                .and_then(encode)
                .unwrap_or(Value::Nil),
        }
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("arity", &self.params.len())
            .field("returns", &self.returns)
            .finish_non_exhaustive()
    }
}
