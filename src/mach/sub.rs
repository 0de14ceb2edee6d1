use super::Address;
use crate::error;
use crate::lang::Error;
use std::collections::HashMap;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// ## Subroutine memory
///
/// Maps a subroutine name to the address of its first body token. An entry
/// is recorded when execution passes linearly over the declaration, so a
/// `call` issued before that point fails the lookup.
#[derive(Debug, Default)]
pub struct Subs {
    subs: HashMap<Rc<str>, Address>,
}

impl Subs {
    pub fn new() -> Subs {
        Subs::default()
    }

    pub fn record(&mut self, sub_name: &str, body: Address) {
        match self.subs.get_mut(sub_name) {
            Some(addr) => *addr = body,
            None => {
                self.subs.insert(sub_name.into(), body);
            }
        }
    }

    pub fn fetch(&self, sub_name: &str) -> Result<Address> {
        match self.subs.get(sub_name) {
            Some(addr) => Ok(*addr),
            None => Err(error!(UndefinedSubroutine; sub_name)),
        }
    }
}
