//! Converters for types that implement serde's traits, see
//! [`Namespace::register_serde`](crate::Namespace::register_serde).

use jk_reflect::Reflect;
use jk_reflect::info::TypeInfo;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::context::{DumpContext, LoadContext};
use crate::error::Error;

pub(crate) fn dump<T>(value: &dyn Reflect, _: &'static TypeInfo, _: &mut DumpContext<'_>) -> Result<Value, Error>
where
    T: Serialize + Reflect,
{
    let value = value
        .downcast_ref::<T>()
        .ok_or_else(|| Error::custom(format_args!("expected a value of type `{}`", core::any::type_name::<T>())))?;
    serde_json::to_value(value).map_err(Error::custom)
}

pub(crate) fn load<T>(json: &Value, _: &'static TypeInfo, _: &mut LoadContext<'_>) -> Result<Box<dyn Reflect>, Error>
where
    T: DeserializeOwned + Reflect,
{
    T::deserialize(json)
        .map(|value| Box::new(value) as Box<dyn Reflect>)
        .map_err(Error::custom)
}

#[cfg(test)]
mod tests {
    use jk_reflect::derive::Reflect;
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    use crate::{DumpOptions, LoadOptions, Namespace, dump_with, load_with};

    #[derive(Reflect, Serialize, Deserialize, Debug, PartialEq)]
    struct Version {
        #[serde(rename = "v")]
        number: u32,
    }

    #[test]
    fn serde_takes_over() {
        let namespace = Namespace::global().fork(Some("serde"));
        namespace.register_serde::<Version>();

        let dumped = dump_with(&Version { number: 3 }, &DumpOptions::new().with_namespace(namespace.clone())).unwrap();
        assert_eq!(dumped, json!({"v": 3}));

        let loaded: Version = load_with(&json!({"v": 4}), &LoadOptions::new().with_namespace(namespace)).unwrap();
        assert_eq!(loaded, Version { number: 4 });

        // The global namespace still reads the field names.
        assert_eq!(crate::dump(&Version { number: 3 }).unwrap(), json!({"number": 3}));
    }
}
