//! Typed accessors on [`Configuration`].
//!
//! Scalar getters are strict: a missing key or a failed coercion is an error.
//! Array getters convert element by element under an explicit
//! [`ElementPolicy`]. Every getter has an `_or_default` twin that never fails.

use super::store::Configuration;
use crate::convert::{convert_to_bool, convert_to_float, convert_to_int, convert_to_string};
use crate::error::{ConfigError, ConvertError, Result};
use crate::value::Value;

/// How array getters treat elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementPolicy {
    /// Convert each element; drop the ones that fail.
    BestEffort,
    /// Render every element as text; nothing is dropped.
    Render,
}

impl Configuration {
    /// The raw value for `key`, before any coercion.
    pub fn get_value(&self, key: &str) -> Result<Value> {
        self.find_key(key)
            .ok_or_else(|| ConfigError::KeyNotFound(key.to_string()))
    }

    fn get_with<T>(
        &self,
        key: &str,
        convert: fn(&Value) -> std::result::Result<T, ConvertError>,
    ) -> Result<T> {
        let value = self.get_value(key)?;
        Ok(convert(&value)?)
    }

    pub fn get_int(&self, key: &str) -> Result<i64> {
        self.get_with(key, convert_to_int)
    }

    pub fn get_int_or_default(&self, key: &str, default: i64) -> i64 {
        self.get_int(key).unwrap_or(default)
    }

    pub fn get_string(&self, key: &str) -> Result<String> {
        self.get_value(key).map(|value| convert_to_string(&value))
    }

    pub fn get_string_or_default(&self, key: &str, default: &str) -> String {
        self.get_string(key).unwrap_or_else(|_| default.to_string())
    }

    pub fn get_float(&self, key: &str) -> Result<f64> {
        self.get_with(key, convert_to_float)
    }

    pub fn get_float_or_default(&self, key: &str, default: f64) -> f64 {
        self.get_float(key).unwrap_or(default)
    }

    /// Only 0/1 (numbers or strings) and real booleans convert.
    pub fn get_bool(&self, key: &str) -> Result<bool> {
        self.get_with(key, convert_to_bool)
    }

    pub fn get_bool_or_default(&self, key: &str, default: bool) -> bool {
        self.get_bool(key).unwrap_or(default)
    }

    /// Collect the elements of an array value under `policy`.
    fn get_array_with<T>(
        &self,
        key: &str,
        policy: ElementPolicy,
        convert: impl Fn(&Value) -> std::result::Result<T, ConvertError>,
    ) -> Result<Vec<T>> {
        let elements = match self.get_value(key)? {
            Value::Seq(items) => items,
            Value::StringSeq(items) => items.into_iter().map(Value::String).collect(),
            _ => return Err(ConfigError::NotAnArray(key.to_string())),
        };

        let converted: Vec<T> = match policy {
            ElementPolicy::BestEffort => elements
                .iter()
                .filter_map(|element| convert(element).ok())
                .collect(),
            ElementPolicy::Render => elements
                .iter()
                .map(&convert)
                .collect::<std::result::Result<_, _>>()?,
        };
        Ok(converted)
    }

    /// Integer elements of an array. Elements that do not convert are skipped.
    pub fn get_int_array(&self, key: &str) -> Result<Vec<i64>> {
        self.get_array_with(key, ElementPolicy::BestEffort, convert_to_int)
    }

    pub fn get_int_array_or_default(&self, key: &str, default: Vec<i64>) -> Vec<i64> {
        self.get_int_array(key).unwrap_or(default)
    }

    /// Every element of an array rendered as text.
    pub fn get_string_array(&self, key: &str) -> Result<Vec<String>> {
        self.get_array_with(key, ElementPolicy::Render, |element| {
            Ok(convert_to_string(element))
        })
    }

    pub fn get_string_array_or_default(&self, key: &str, default: Vec<String>) -> Vec<String> {
        self.get_string_array(key).unwrap_or(default)
    }

    /// Float elements of an array. Elements that do not convert are skipped.
    pub fn get_float_array(&self, key: &str) -> Result<Vec<f64>> {
        self.get_array_with(key, ElementPolicy::BestEffort, convert_to_float)
    }

    pub fn get_float_array_or_default(&self, key: &str, default: Vec<f64>) -> Vec<f64> {
        self.get_float_array(key).unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigSource;
    use std::fs;
    use tempfile::TempDir;

    fn from_json(temp: &TempDir, content: &str) -> Configuration {
        let path = temp.path().join("config.json");
        fs::write(&path, content).unwrap();
        Configuration::new().add_config_source(ConfigSource::json(&path))
    }

    fn from_yaml(temp: &TempDir, content: &str) -> Configuration {
        let path = temp.path().join("config.yaml");
        fs::write(&path, content).unwrap();
        Configuration::new().add_config_source(ConfigSource::yaml(&path))
    }

    #[test]
    fn test_scalar_getters() {
        let temp = TempDir::new().unwrap();
        let c = from_yaml(
            &temp,
            "port: 8080\nratio: 0.25\nname: svc\nenabled: 1\nflag: true\nweird: 7\n",
        );

        assert_eq!(c.get_int("port").unwrap(), 8080);
        assert_eq!(c.get_float("port").unwrap(), 8080.0);
        assert_eq!(c.get_string("port").unwrap(), "8080");
        assert_eq!(c.get_float("ratio").unwrap(), 0.25);
        assert_eq!(c.get_int("ratio").unwrap(), 0);
        assert_eq!(c.get_string("name").unwrap(), "svc");
        assert!(c.get_bool("enabled").unwrap());
        assert!(c.get_bool("flag").unwrap());
        assert_eq!(c.get_int("flag").unwrap(), 1);

        assert!(matches!(
            c.get_bool("weird"),
            Err(ConfigError::Convert(ConvertError::UnknownValue(_)))
        ));
        assert!(matches!(
            c.get_int("name"),
            Err(ConfigError::Convert(ConvertError::ParseInt(_)))
        ));
    }

    #[test]
    fn test_missing_key() {
        let temp = TempDir::new().unwrap();
        let c = from_yaml(&temp, "a: 1\n");
        assert!(c.get_int("missing").unwrap_err().is_key_not_found());
        assert!(c.get_string("missing").unwrap_err().is_key_not_found());
        assert!(c.get_float("missing").unwrap_err().is_key_not_found());
        assert!(c.get_bool("missing").unwrap_err().is_key_not_found());
        assert!(c.get_int_array("missing").unwrap_err().is_key_not_found());
        assert!(c.get_value("missing").unwrap_err().is_key_not_found());
    }

    #[test]
    fn test_scalar_defaults() {
        let temp = TempDir::new().unwrap();
        let c = from_yaml(&temp, "text: abc\nlist: [1, 2]\ncount: 3\n");

        assert_eq!(c.get_int_or_default("text", 42), 42);
        assert_eq!(c.get_int_or_default("missing", 42), 42);
        assert_eq!(c.get_int_or_default("count", 42), 3);
        assert_eq!(c.get_float_or_default("list", 1.5), 1.5);
        assert!(c.get_bool_or_default("text", true));
        assert_eq!(c.get_string_or_default("missing", "fallback"), "fallback");
        assert_eq!(c.get_string_or_default("list", "fallback"), "[1 2]");
    }

    #[test]
    fn test_int_array_skips_bad_elements() {
        let temp = TempDir::new().unwrap();
        let c = from_json(&temp, r#"{"intarraykey":[123,456,"abc",789]}"#);
        assert_eq!(c.get_int_array("intarraykey").unwrap(), vec![123, 456, 789]);
    }

    #[test]
    fn test_json_float_elements_truncate() {
        let temp = TempDir::new().unwrap();
        let c = from_json(&temp, r#"{"values":[1.9, "2", -3.5, null, true]}"#);
        assert_eq!(c.get_int_array("values").unwrap(), vec![1, 2, -3, 1]);
        assert_eq!(
            c.get_float_array("values").unwrap(),
            vec![1.9, 2.0, -3.5, 1.0]
        );
    }

    #[test]
    fn test_string_array_renders_everything() {
        let temp = TempDir::new().unwrap();
        let c = from_yaml(&temp, "mixed: [a, 2, 2.5, true, ~, [x, y]]\n");
        assert_eq!(
            c.get_string_array("mixed").unwrap(),
            vec!["a", "2", "2.5", "true", "<nil>", "[x y]"]
        );
    }

    #[test]
    fn test_not_an_array() {
        let temp = TempDir::new().unwrap();
        let c = from_yaml(&temp, "scalar: 5\nnested:\n  a: 1\n");
        assert!(matches!(
            c.get_int_array("scalar"),
            Err(ConfigError::NotAnArray(key)) if key == "scalar"
        ));
        assert!(matches!(
            c.get_string_array("nested"),
            Err(ConfigError::NotAnArray(_))
        ));
        assert_eq!(c.get_float_array_or_default("scalar", vec![0.5]), vec![0.5]);
        assert_eq!(
            c.get_string_array_or_default("missing", vec!["d".to_string()]),
            vec!["d".to_string()]
        );
        assert_eq!(c.get_int_array_or_default("nested", vec![9]), vec![9]);
    }

    #[test]
    fn test_env_bracket_arrays() {
        // SAFETY: the variable names are unique to this test.
        unsafe {
            std::env::set_var("CONFIG_LAYERS_ACCESSOR_ARR", "[val1,val2,123]");
            std::env::set_var("CONFIG_LAYERS_ACCESSOR_NUMS", "[1,x,3.5]");
        }
        let c = Configuration::new().add_config_source(ConfigSource::env());
        assert_eq!(
            c.get_string_array("CONFIG_LAYERS_ACCESSOR_ARR").unwrap(),
            vec!["val1", "val2", "123"]
        );
        assert_eq!(
            c.get_int_array("CONFIG_LAYERS_ACCESSOR_NUMS").unwrap(),
            vec![1]
        );
        assert_eq!(
            c.get_float_array("CONFIG_LAYERS_ACCESSOR_NUMS").unwrap(),
            vec![1.0, 3.5]
        );
    }
}
