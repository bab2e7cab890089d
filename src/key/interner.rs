use parking_lot::RwLock;
use std::{collections::HashMap, sync::OnceLock};

/// Process-wide string table
///
/// Index 0 is reserved for the empty string, which is the invalid key.
/// Interned strings are leaked and live for the rest of the process.
pub(super) struct Interner {
    lookup: HashMap<&'static str, u32>,
    strings: Vec<&'static str>,
}

impl Interner {
    fn new() -> Self {
        let mut lookup = HashMap::new();
        lookup.insert("", 0);
        Self {
            lookup,
            strings: vec![""],
        }
    }
}

fn get_interner() -> &'static RwLock<Interner> {
    static INTERNER: OnceLock<RwLock<Interner>> = OnceLock::new();

    INTERNER.get_or_init(|| RwLock::new(Interner::new()))
}

pub(super) fn intern(value: &str) -> u32 {
    let interner = get_interner();

    // fast get with shared access
    if let Some(index) = interner.read().lookup.get(value) {
        return *index;
    }

    // slow get with unique access
    let mut interner = interner.write();
    if let Some(index) = interner.lookup.get(value) {
        return *index;
    }

    // create & store
    let stored: &'static str = Box::leak(Box::<str>::from(value));
    let index = match u32::try_from(interner.strings.len()) {
        Ok(index) => index,
        Err(_) => panic!("key interner is full"),
    };
    interner.strings.push(stored);
    interner.lookup.insert(stored, index);
    index
}

pub(super) fn resolve(index: u32) -> &'static str {
    get_interner()
        .read()
        .strings
        .get(index as usize)
        .copied()
        .unwrap_or("")
}
