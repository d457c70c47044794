use recurrence_microstates::estimators::{MicrostateError, Settings, StorageMode, Strategy};

/// Automatic mode keeps the dense vector up to 26 window cells.
#[test]
fn test_auto_selects_dense_at_or_below_threshold() {
    let settings = Settings::new(vec![5, 5]).unwrap();
    assert_eq!(settings.strategy(), Strategy::Dense);

    let settings = Settings::new(vec![2, 13]).unwrap();
    assert_eq!(settings.hypervolume(), 26);
    assert_eq!(settings.strategy(), Strategy::Dense);
}

#[test]
fn test_auto_selects_sparse_above_threshold() {
    let settings = Settings::new(vec![1, 27]).unwrap();
    assert_eq!(settings.strategy(), Strategy::Sparse);

    let settings = Settings::new(vec![8, 8]).unwrap();
    assert_eq!(settings.strategy(), Strategy::Sparse);
}

#[test]
fn test_forced_dictionary_wins_below_threshold() {
    let settings =
        Settings::new_with_threads_and_mode(vec![2, 2], 1, StorageMode::ForceDictionary).unwrap();
    assert_eq!(settings.strategy(), Strategy::Sparse);
}

/// Forcing the vector strategy overrides the hypervolume rule.
#[test]
fn test_forced_vector_wins_above_threshold() {
    let settings =
        Settings::new_with_threads_and_mode(vec![1, 27], 1, StorageMode::ForceVector).unwrap();
    assert_eq!(settings.strategy(), Strategy::Dense);
}

/// A dense table over 2^64 codes cannot be materialized.
#[test]
fn test_forced_vector_at_full_hypervolume_is_rejected() {
    let err = Settings::new_with_threads_and_mode(vec![8, 8], 1, StorageMode::ForceVector)
        .unwrap_err();
    assert!(matches!(err, MicrostateError::Configuration(_)), "{err}");
}
