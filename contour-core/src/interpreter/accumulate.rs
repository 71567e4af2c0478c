//! Shared error accumulation for container nodes (`Tuple`, `TypeLiteral`).
//!
//! Both container kinds walk a sequence of positions, parsing each against
//! its own sub-parser and deciding, per §4.3, whether a fatal error at that
//! position should stop the walk (`all_errors == false`) or merely be
//! recorded before moving on (`all_errors == true`). Grounded on the
//! teacher's own `ControlFlow`-based short-circuit helper
//! (`grill-core/src/control_flow_ext.rs`): `Break` here means "stop
//! visiting further positions", `Continue` means "keep going".

use std::ops::ControlFlow;

use crate::diagnostic::{self, ParseError, ParseResult};
use crate::options::ParseOptions;

pub struct Accumulator {
    errors: Vec<ParseError>,
    fatal: bool,
    all_errors: bool,
}

impl Accumulator {
    pub fn new(opts: &ParseOptions) -> Self {
        Self {
            errors: Vec::new(),
            fatal: false,
            all_errors: opts.all_errors,
        }
    }

    /// Records a non-fatal diagnostic; never stops the walk.
    pub fn warn(&mut self, errs: impl IntoIterator<Item = ParseError>) {
        self.errors.extend(errs);
    }

    /// Records a fatal diagnostic. Returns `Break` when the caller should
    /// stop visiting further positions (`all_errors == false`); `Continue`
    /// when it should keep accumulating.
    pub fn fail(&mut self, err: ParseError) -> ControlFlow<()> {
        self.errors.push(err);
        self.fatal = true;
        if self.all_errors {
            ControlFlow::Continue(())
        } else {
            ControlFlow::Break(())
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.fatal
    }

    /// Folds a sub-parser's `ParseResult` into this accumulator under path
    /// wrapper `wrap` (e.g. `|e| ParseError::Index(i, e)`), pushing the
    /// produced value into `out` on `Success`/`Warning`. Returns `Break`
    /// when the walk should stop at this position.
    pub fn absorb(
        &mut self,
        result: ParseResult<crate::value::Value>,
        wrap: impl FnOnce(Vec<ParseError>) -> ParseError,
        out: &mut Vec<crate::value::Value>,
    ) -> ControlFlow<()> {
        match result {
            ParseResult::Success(v) => {
                out.push(v);
                ControlFlow::Continue(())
            }
            ParseResult::Warning(errs, v) => {
                self.warn(std::iter::once(wrap(errs)));
                out.push(v);
                ControlFlow::Continue(())
            }
            ParseResult::Failure(errs) => self.fail(wrap(errs)),
        }
    }

    pub fn finish<A>(self, value: Option<A>) -> ParseResult<A> {
        diagnostic::finish(self.errors, self.fatal, value)
    }
}
