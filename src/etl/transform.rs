//! Transformer trait for data transformation

use eyre::Result;

/// Transformer trait for turning raw items into normalized rows
///
/// # Example
/// ```no_run
/// use covid_etl::etl::Transformer;
/// use eyre::{OptionExt, Result};
///
/// struct CountryName;
///
/// impl Transformer for CountryName {
///     type Input = serde_json::Value;
///     type Output = String;
///
///     fn transform(&self, input: Self::Input) -> Result<Self::Output> {
///         input["country"]
///             .as_str()
///             .map(str::to_string)
///             .ok_or_eyre("record has no country")
///     }
/// }
/// ```
pub trait Transformer: Send + Sync {
    /// Input item type
    type Input: Send;

    /// Output item type after transformation
    type Output: Send;

    /// Transform a single item
    ///
    /// # Errors
    /// Returns an error if the item cannot be converted
    fn transform(&self, input: Self::Input) -> Result<Self::Output>;

    /// Transform a batch of items, preserving order
    ///
    /// The first failing item aborts the whole batch; no partial output is
    /// returned.
    fn transform_many(&self, inputs: Vec<Self::Input>) -> Result<Vec<Self::Output>> {
        inputs.into_iter().map(|i| self.transform(i)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Halver;

    impl Transformer for Halver {
        type Input = i32;
        type Output = i32;

        fn transform(&self, input: Self::Input) -> Result<Self::Output> {
            if input % 2 != 0 {
                eyre::bail!("{} is odd", input);
            }
            Ok(input / 2)
        }
    }

    #[test]
    fn test_transform_many_preserves_order() {
        let output = Halver.transform_many(vec![8, 2, 4]).unwrap();
        assert_eq!(output, vec![4, 1, 2]);
    }

    #[test]
    fn test_transform_many_fails_whole_batch() {
        let result = Halver.transform_many(vec![2, 3, 4]);
        assert!(result.unwrap_err().to_string().contains("3 is odd"));
    }
}
