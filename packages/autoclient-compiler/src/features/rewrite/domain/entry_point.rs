//! The six recognized entry points

use std::fmt;

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EntryPoint {
    /// `apiURL<T>()`
    ApiUrl,
    /// `apiCall<T>(adder)`
    ApiCall,
    /// `validator<T>(ctor)`
    Validator,
    /// `addAPI<T>(validatorCtor, adder, endpoint)`
    AddApi,
    /// `generateAPITree<T>(caller)`
    GenerateApiTree,
    /// `generateRequest<T>(testConnection, account, params, body, conf, member?, session?)`
    GenerateRequest,
}

static BY_NAME: Lazy<FxHashMap<&'static str, EntryPoint>> =
    Lazy::new(|| EntryPoint::ALL.iter().map(|e| (e.name(), *e)).collect());

impl EntryPoint {
    pub const ALL: [EntryPoint; 6] = [
        EntryPoint::ApiUrl,
        EntryPoint::ApiCall,
        EntryPoint::Validator,
        EntryPoint::AddApi,
        EntryPoint::GenerateApiTree,
        EntryPoint::GenerateRequest,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        BY_NAME.get(name).copied()
    }

    /// Exported name in the marker module
    pub fn name(&self) -> &'static str {
        match self {
            EntryPoint::ApiUrl => "apiURL",
            EntryPoint::ApiCall => "apiCall",
            EntryPoint::Validator => "validator",
            EntryPoint::AddApi => "addAPI",
            EntryPoint::GenerateApiTree => "generateAPITree",
            EntryPoint::GenerateRequest => "generateRequest",
        }
    }

    /// Accepted number of value arguments (inclusive)
    pub fn arity(&self) -> (usize, usize) {
        match self {
            EntryPoint::ApiUrl => (0, 0),
            EntryPoint::ApiCall | EntryPoint::Validator | EntryPoint::GenerateApiTree => (1, 1),
            EntryPoint::AddApi => (3, 3),
            EntryPoint::GenerateRequest => (5, 7),
        }
    }

    pub fn accepts_arity(&self, count: usize) -> bool {
        let (min, max) = self.arity();
        (min..=max).contains(&count)
    }
}

impl fmt::Display for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
