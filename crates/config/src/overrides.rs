use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

use serde::de;

/// Which template of an output kind a setting refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TemplateField {
    Url,
    SaveAs,
}

impl TemplateField {
    pub const ALL: [TemplateField; 2] = [TemplateField::Url, TemplateField::SaveAs];

    pub fn as_str(self) -> &'static str {
        match self {
            TemplateField::Url => "url",
            TemplateField::SaveAs => "save_as",
        }
    }
}

impl fmt::Display for TemplateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A template given again after it was already set in the same file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redefinition {
    pub field: TemplateField,
    pub first: String,
    pub second: String,
}

/// URL and save-path overrides for one output kind.
///
/// The first definition of each template is kept; later ones are recorded in `redefined` so
/// the model can reject conflicting settings instead of silently picking one.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize)]
#[cfg_attr(not(feature = "unstable"), non_exhaustive)]
pub struct OutputTemplates {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub save_as: Option<String>,
    #[serde(skip)]
    pub redefined: Vec<Redefinition>,
}

impl OutputTemplates {
    pub fn new(url: Option<String>, save_as: Option<String>) -> Self {
        Self {
            url,
            save_as,
            redefined: Vec::new(),
        }
    }

    pub fn get(&self, field: TemplateField) -> Option<&str> {
        match field {
            TemplateField::Url => self.url.as_deref(),
            TemplateField::SaveAs => self.save_as.as_deref(),
        }
    }

    fn slot(&mut self, field: TemplateField) -> &mut Option<String> {
        match field {
            TemplateField::Url => &mut self.url,
            TemplateField::SaveAs => &mut self.save_as,
        }
    }

    fn define(&mut self, field: TemplateField, value: String) {
        if let Some(first) = self.get(field) {
            let first = first.to_owned();
            self.redefined.push(Redefinition {
                field,
                first,
                second: value,
            });
        } else {
            *self.slot(field) = Some(value);
        }
    }
}

impl Merge for OutputTemplates {
    fn merge(&mut self, later: Self) {
        for field in TemplateField::ALL {
            if let Some(value) = later.get(field) {
                self.define(field, value.to_owned());
            }
        }
        for redefinition in later.redefined {
            self.define(redefinition.field, redefinition.second);
        }
    }
}

impl<'de> serde::Deserialize<'de> for OutputTemplates {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_map(OutputTemplatesVisitor)
    }
}

struct OutputTemplatesVisitor;

impl<'de> de::Visitor<'de> for OutputTemplatesVisitor {
    type Value = OutputTemplates;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map with `url` and `save_as`")
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(OutputTemplates::default())
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: de::MapAccess<'de>,
    {
        const FIELDS: &[&str] = &["url", "save_as"];

        let mut templates = OutputTemplates::default();
        while let Some(key) = access.next_key::<String>()? {
            let field = match key.as_str() {
                "url" => TemplateField::Url,
                "save_as" => TemplateField::SaveAs,
                _ if cfg!(feature = "unstable") => {
                    return Err(de::Error::unknown_field(&key, FIELDS));
                }
                _ => {
                    access.next_value::<de::IgnoredAny>()?;
                    continue;
                }
            };
            let value: String = access.next_value()?;
            templates.define(field, value);
        }
        Ok(templates)
    }
}

/// Path override for one feed; `None` disables it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FeedOverride {
    pub path: Option<String>,
    /// Later definitions of the same feed, in file order.
    pub redefined: Vec<Option<String>>,
}

impl FeedOverride {
    pub fn new(path: Option<String>) -> Self {
        Self {
            path,
            redefined: Vec::new(),
        }
    }
}

impl Merge for FeedOverride {
    fn merge(&mut self, later: Self) {
        self.redefined.push(later.path);
        self.redefined.extend(later.redefined);
    }
}

impl serde::Serialize for FeedOverride {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serde::Serialize::serialize(&self.path, serializer)
    }
}

impl<'de> serde::Deserialize<'de> for FeedOverride {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        let path = <Option<String> as de::Deserialize<'de>>::deserialize(deserializer)?;
        Ok(Self::new(path))
    }
}

/// Folds a repeated map entry into the first one.
pub trait Merge {
    fn merge(&mut self, later: Self);
}

/// Deserialize a map, merging repeated keys instead of letting the last one win.
pub(crate) fn merge_repeated<'de, D, K, V>(deserializer: D) -> Result<BTreeMap<K, V>, D::Error>
where
    D: de::Deserializer<'de>,
    K: de::Deserialize<'de> + Ord,
    V: de::Deserialize<'de> + Merge,
{
    deserializer.deserialize_map(MergeVisitor(PhantomData))
}

struct MergeVisitor<K, V>(PhantomData<(K, V)>);

impl<'de, K, V> de::Visitor<'de> for MergeVisitor<K, V>
where
    K: de::Deserialize<'de> + Ord,
    V: de::Deserialize<'de> + Merge,
{
    type Value = BTreeMap<K, V>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(BTreeMap::new())
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: de::MapAccess<'de>,
    {
        let mut map = BTreeMap::new();
        while let Some((key, value)) = access.next_entry::<K, V>()? {
            match map.entry(key) {
                btree_map::Entry::Vacant(entry) => {
                    entry.insert(value);
                }
                btree_map::Entry::Occupied(mut entry) => entry.get_mut().merge(value),
            }
        }
        Ok(map)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{FeedKind, OutputKind};

    #[derive(Debug, serde::Deserialize)]
    struct Outputs {
        #[serde(deserialize_with = "merge_repeated")]
        outputs: BTreeMap<OutputKind, OutputTemplates>,
    }

    #[derive(Debug, serde::Deserialize)]
    struct Feeds {
        #[serde(deserialize_with = "merge_repeated")]
        feeds: BTreeMap<FeedKind, FeedOverride>,
    }

    #[test]
    fn repeated_kind_keeps_first_and_records_later() {
        let actual: Outputs = serde_yaml::from_str(
            "
outputs:
  page:
    save_as: '{slug}.html'
  page:
    save_as: 'pages/{slug}.html'
",
        )
        .unwrap();
        let page = &actual.outputs[&OutputKind::Page];
        assert_eq!(page.save_as.as_deref(), Some("{slug}.html"));
        assert_eq!(
            page.redefined,
            vec![Redefinition {
                field: TemplateField::SaveAs,
                first: "{slug}.html".to_owned(),
                second: "pages/{slug}.html".to_owned(),
            }]
        );
    }

    #[test]
    fn repeated_field_is_recorded() {
        let actual: Outputs = serde_yaml::from_str(
            "
outputs:
  page:
    url: '{slug}.html'
    save_as: '{slug}.html'
    save_as: 'pages/{slug}.html'
",
        )
        .unwrap();
        let page = &actual.outputs[&OutputKind::Page];
        assert_eq!(page.url.as_deref(), Some("{slug}.html"));
        assert_eq!(page.save_as.as_deref(), Some("{slug}.html"));
        assert_eq!(page.redefined.len(), 1);
        assert_eq!(page.redefined[0].second, "pages/{slug}.html");
    }

    #[test]
    fn repeated_kind_fills_missing_fields() {
        let actual: Outputs = serde_yaml::from_str(
            "
outputs:
  page:
    url: '{slug}.html'
  page:
    save_as: '{slug}.html'
",
        )
        .unwrap();
        let page = &actual.outputs[&OutputKind::Page];
        assert_eq!(
            page,
            &OutputTemplates::new(Some("{slug}.html".into()), Some("{slug}.html".into()))
        );
    }

    #[cfg(feature = "unstable")]
    #[test]
    fn unknown_template_field() {
        let actual = serde_yaml::from_str::<Outputs>("outputs:\n  page:\n    path: x.html\n");
        assert!(actual.is_err());
    }

    #[test]
    fn repeated_feed_is_recorded() {
        let actual: Feeds = serde_yaml::from_str(
            "
feeds:
  all_atom: feeds/all.atom.xml
  all_atom: ~
",
        )
        .unwrap();
        let feed = &actual.feeds[&FeedKind::AllAtom];
        assert_eq!(feed.path.as_deref(), Some("feeds/all.atom.xml"));
        assert_eq!(feed.redefined, vec![None]);
    }
}
