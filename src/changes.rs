use crate::endpoint::Endpoint;
use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnNull, serde_as};

/// Pair with direction
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FromTo<T> {
    pub from: T,
    pub to: T,
}

/// Data structure posted from ExternalDNS.
/// The data represent the changes that ExternalDNS wants to make.
/// On the wire updates travel as two positionally paired lists, `updateOld`
/// and `updateNew`; they are zipped into `FromTo` pairs while decoding so the
/// two halves cannot drift apart further in.
#[serde_as]
#[derive(Serialize, Deserialize, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Changes {
    // When removing records this field is `null`, instead of `[]` as used in
    // other fields.
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub create: Vec<Endpoint>,
    #[serde(flatten, with = "serde_fromto")]
    pub update: Vec<FromTo<Endpoint>>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub delete: Vec<Endpoint>,
}

mod serde_fromto {
    use super::FromTo;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    #[serde(default)]
    struct FromTos<T> {
        #[serde(rename = "updateOld")]
        old: Vec<T>,
        #[serde(rename = "updateNew")]
        new: Vec<T>,
    }
    impl<T> Default for FromTos<T> {
        fn default() -> Self {
            Self {
                old: Default::default(),
                new: Default::default(),
            }
        }
    }

    pub fn serialize<S, T>(fts: &Vec<FromTo<T>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Serialize + Clone,
    {
        let mut out = FromTos {
            old: vec![],
            new: vec![],
        };
        for ft in fts {
            out.old.push(ft.from.clone());
            out.new.push(ft.to.clone());
        }

        out.serialize(serializer)
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Vec<FromTo<T>>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        let the_in = FromTos::deserialize(deserializer)?;
        if the_in.old.len() == the_in.new.len() {
            let ret: Vec<FromTo<_>> = std::iter::zip(the_in.old, the_in.new)
                .map(|(from, to)| FromTo { from, to })
                .collect();
            Ok(ret)
        } else {
            Err(D::Error::custom(
                "The count of updateOld and updateNew entries are not the same",
            ))
        }
    }
}
