use strum::IntoEnumIterator;

/// Comma-separated list of every variant name, for "valid values" hints in errors.
pub fn valid_csv<T>() -> String
where
    T: IntoEnumIterator + AsRef<str>,
{
    T::iter()
        .map(|v| v.as_ref().to_owned())
        .collect::<Vec<_>>()
        .join(", ")
}
