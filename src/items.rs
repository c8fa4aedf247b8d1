// Result list schema consumed by the launcher's script filter:
// `{"items": [ {title, subtitle, arg, icon, quicklookurl, mods}, ... ]}`.
// Optional fields are left out of the JSON entirely when unset.

use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultList {
    pub items: Vec<ResultItem>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultItem {
    pub title: String,
    pub subtitle: String,
    /// Value handed back to the workflow when the item is actioned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quicklookurl: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mods: Option<Mods>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Icon {
    pub path: String,
}

/// Alternate actions keyed by the modifier held while pressing Enter.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Mods {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cmd: Option<Modifier>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Modifier {
    pub valid: bool,
    pub arg: String,
    pub subtitle: String,
}

impl ResultItem {
    /// An actionable item whose default action receives `arg`.
    pub fn action(title: impl Into<String>, subtitle: impl Into<String>, arg: impl Into<String>) -> Self {
        ResultItem {
            title: title.into(),
            subtitle: subtitle.into(),
            arg: Some(arg.into()),
            ..Default::default()
        }
    }

    /// A purely informational item; the launcher won't action it.
    pub fn notice(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        ResultItem {
            title: title.into(),
            subtitle: subtitle.into(),
            valid: Some(false),
            ..Default::default()
        }
    }

    pub fn with_icon(mut self, path: Option<&Path>) -> Self {
        self.icon = path.map(|p| Icon {
            path: p.to_string_lossy().into_owned(),
        });
        self
    }

    pub fn with_quicklook(mut self, url: impl Into<String>) -> Self {
        self.quicklookurl = Some(url.into());
        self
    }

    /// Attach the Cmd+Enter variant.
    pub fn with_cmd(mut self, arg: impl Into<String>, subtitle: impl Into<String>) -> Self {
        self.mods = Some(Mods {
            cmd: Some(Modifier {
                valid: true,
                arg: arg.into(),
                subtitle: subtitle.into(),
            }),
        });
        self
    }
}

impl ResultList {
    pub fn new(items: Vec<ResultItem>) -> Self {
        ResultList { items }
    }

    pub fn single(item: ResultItem) -> Self {
        ResultList { items: vec![item] }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
