//=========================================================================
// Query Responder
//=========================================================================
//
// Synchronous scalar reads for the native core.
//
// Answers come straight from the shell context's published values;
// nothing is marshaled onto the UI thread and nothing blocks. No live
// shell, or an unknown key, answers 0.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;

//=== Internal Dependencies ===============================================

use super::context::ShellContext;
use super::interface::KeyboardClass;

//=== Query Keys ==========================================================

/// Floating-point query keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberQuery {
    DisplayDensity,
    Unknown(i32),
}

impl NumberQuery {
    pub fn from_key(key: i32) -> Self {
        match key {
            1 => Self::DisplayDensity,
            other => Self::Unknown(other),
        }
    }
}

/// Integer query keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntegerQuery {
    KeyboardClass,
    Unknown(i32),
}

impl IntegerQuery {
    pub fn from_key(key: i32) -> Self {
        match key {
            1 => Self::KeyboardClass,
            other => Self::Unknown(other),
        }
    }
}

//=== QueryResponder ======================================================

/// Thread-safe, non-blocking host state reader.
#[derive(Debug, Clone)]
pub struct QueryResponder {
    context: ShellContext,
}

impl QueryResponder {
    pub(crate) fn new(context: ShellContext) -> Self {
        Self { context }
    }

    //--- Raw Keys ---------------------------------------------------------

    pub fn get_number(&self, key: i32) -> f32 {
        self.number(NumberQuery::from_key(key))
    }

    pub fn get_integer(&self, key: i32) -> i32 {
        self.integer(IntegerQuery::from_key(key))
    }

    //--- Typed Keys -------------------------------------------------------

    pub fn number(&self, query: NumberQuery) -> f32 {
        if self.context.current().is_none() {
            return 0.0;
        }
        match query {
            NumberQuery::DisplayDensity => self.context.density(),
            NumberQuery::Unknown(key) => {
                trace!(target: "bridge::queries", "Unknown number key {}", key);
                0.0
            }
        }
    }

    pub fn integer(&self, query: IntegerQuery) -> i32 {
        if self.context.current().is_none() {
            return 0;
        }
        match query {
            IntegerQuery::KeyboardClass => self.context.keyboard().as_raw(),
            IntegerQuery::Unknown(key) => {
                trace!(target: "bridge::queries", "Unknown integer key {}", key);
                0
            }
        }
    }

    //--- Convenience ------------------------------------------------------

    pub fn display_density(&self) -> f32 {
        self.number(NumberQuery::DisplayDensity)
    }

    pub fn keyboard_class(&self) -> KeyboardClass {
        KeyboardClass::from_raw(self.integer(IntegerQuery::KeyboardClass))
    }

    /// True when a full physical keyboard is attached.
    pub fn is_keyboard_connected(&self) -> bool {
        self.keyboard_class() == KeyboardClass::Qwerty
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::shell::interface::HostConfiguration;

    fn bound(density: f32, keyboard: KeyboardClass) -> (ShellContext, QueryResponder) {
        let context = ShellContext::new();
        context.bind(HostConfiguration { density, keyboard });
        let queries = QueryResponder::new(context.clone());
        (context, queries)
    }

    #[test]
    fn unbound_queries_return_zero() {
        let queries = QueryResponder::new(ShellContext::new());

        assert_eq!(queries.get_number(1), 0.0);
        assert_eq!(queries.get_integer(1), 0);
        assert!(!queries.is_keyboard_connected());
    }

    #[test]
    fn density_is_answered() {
        let (_ctx, queries) = bound(3.0, KeyboardClass::NoKeys);
        assert_eq!(queries.get_number(1), 3.0);
        assert_eq!(queries.display_density(), 3.0);
    }

    #[test]
    fn keyboard_class_is_answered() {
        let (_ctx, queries) = bound(1.0, KeyboardClass::Qwerty);
        assert_eq!(queries.get_integer(1), 2);
        assert!(queries.is_keyboard_connected());
    }

    #[test]
    fn twelve_key_is_not_connected_keyboard() {
        let (_ctx, queries) = bound(1.0, KeyboardClass::TwelveKey);
        assert_eq!(queries.keyboard_class(), KeyboardClass::TwelveKey);
        assert!(!queries.is_keyboard_connected());
    }

    #[test]
    fn unknown_keys_return_zero() {
        let (_ctx, queries) = bound(2.0, KeyboardClass::Qwerty);
        assert_eq!(queries.get_number(0), 0.0);
        assert_eq!(queries.get_number(2), 0.0);
        assert_eq!(queries.get_integer(-5), 0);
    }

    #[test]
    fn queries_after_unbind_return_zero() {
        let (ctx, queries) = bound(2.0, KeyboardClass::Qwerty);
        ctx.unbind();

        assert_eq!(queries.display_density(), 0.0);
        assert_eq!(queries.get_integer(1), 0);
    }

    #[test]
    fn queries_while_finishing_return_zero() {
        let (ctx, queries) = bound(2.0, KeyboardClass::Qwerty);
        if let Some(handle) = ctx.current() {
            ctx.begin_finish(handle);
        }

        assert_eq!(queries.display_density(), 0.0);
    }

    #[test]
    fn republished_configuration_is_visible() {
        let (ctx, queries) = bound(1.0, KeyboardClass::NoKeys);
        ctx.publish(HostConfiguration {
            density: 1.5,
            keyboard: KeyboardClass::Qwerty,
        });

        assert_eq!(queries.display_density(), 1.5);
        assert!(queries.is_keyboard_connected());
    }
}
