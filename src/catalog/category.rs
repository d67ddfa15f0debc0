use serde::{Deserialize, Deserializer, Serialize};

/// A named group of resource links. The name lives in the owning [`super::Catalog`].
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
pub struct Category {
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub links: Vec<String>,
}

// Absent and `null` fields degrade to their empty value, wrong types are still errors.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
