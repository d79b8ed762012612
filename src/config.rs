//! Backend flavours.
//!
//! The services differ in the name they are reached under and in the
//! placeholder arguments their dataset source node expects. Both live in a
//! [`SourceConfig`]; the presets cover the known services.

use crate::ast::{Expr, Stream};

/// Function name of the dataset source node at the root of every query.
pub const SOURCE_NODE: &str = "EventDataset";

/// File name the C++ and uproot backends expect on the source node. The
/// service substitutes the real files.
pub const PLACEHOLDER_SOURCE_FILE: &str = "bogus.root";

#[derive(Debug, Clone, PartialEq)]
pub struct SourceConfig {
    backend_name: String,
    source_args: Vec<Expr>,
}

impl SourceConfig {
    pub fn new(backend_name: impl Into<String>, source_args: Vec<Expr>) -> Self {
        SourceConfig {
            backend_name: backend_name.into(),
            source_args,
        }
    }

    /// ATLAS xAOD C++ backend.
    pub fn xaod() -> Self {
        Self::new("xaod", vec![Expr::string(PLACEHOLDER_SOURCE_FILE)])
    }

    /// CMS Run 1 AOD C++ backend.
    pub fn cms_run1_aod() -> Self {
        Self::new("cms_run1_aod", vec![Expr::string(PLACEHOLDER_SOURCE_FILE)])
    }

    /// uproot backend reading `tree_name` from each file.
    pub fn uproot(tree_name: impl Into<String>) -> Self {
        Self::new(
            "uproot",
            vec![
                Expr::string(PLACEHOLDER_SOURCE_FILE),
                Expr::string(tree_name),
            ],
        )
    }

    /// Look up a preset by backend name. `tree_name` is only used by uproot.
    pub fn preset(backend_name: &str, tree_name: Option<&str>) -> Option<Self> {
        match backend_name {
            "xaod" => Some(Self::xaod()),
            "cms_run1_aod" => Some(Self::cms_run1_aod()),
            "uproot" => tree_name.map(Self::uproot),
            _ => None,
        }
    }

    pub fn backend_name(&self) -> &str {
        &self.backend_name
    }

    pub fn source_args(&self) -> &[Expr] {
        &self.source_args
    }

    /// The dataset source node, `(call EventDataset <source args>)`.
    pub fn source(&self) -> Stream {
        Stream::new(Expr::call(SOURCE_NODE, self.source_args.iter().cloned()))
    }
}
