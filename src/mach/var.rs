use crate::error;
use crate::lang::Error;
use std::collections::HashMap;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// ## Variable memory
///
/// One namespace for the entire run: no scopes, no shadowing. Entries are
/// created on first assignment and live until the run ends. Reading a name
/// that was never assigned is an error; there is no default value.
#[derive(Debug, Default)]
pub struct Var {
    vars: HashMap<Rc<str>, i64>,
}

impl Var {
    pub fn new() -> Var {
        Var::default()
    }

    pub fn clear(&mut self) {
        self.vars.clear();
    }

    pub fn fetch(&self, var_name: &str) -> Result<i64> {
        match self.vars.get(var_name) {
            Some(val) => Ok(*val),
            None => Err(error!(UndefinedSymbol; var_name)),
        }
    }

    pub fn store(&mut self, var_name: &str, value: i64) {
        match self.vars.get_mut(var_name) {
            Some(var) => *var = value,
            None => {
                self.vars.insert(var_name.into(), value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_fetch_roundtrip() {
        let mut vars = Var::new();
        vars.store("x", 7);
        assert_eq!(vars.fetch("x").unwrap(), 7);
        vars.store("x", -3);
        assert_eq!(vars.fetch("x").unwrap(), -3);
    }

    #[test]
    fn test_fetch_unassigned_fails() {
        let vars = Var::new();
        let error = vars.fetch("nope").unwrap_err();
        assert_eq!(error.to_string(), "UNDEFINED SYMBOL; nope");
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let mut vars = Var::new();
        vars.store("Total", 1);
        assert!(vars.fetch("total").is_err());
    }
}
