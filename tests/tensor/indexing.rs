use ndarray::{Array2, ArrayD, IxDyn, array};
use recurrence_microstates::estimators::{MicrostateError, Tensor};

/// Iterating every coordinate combination must hit every offset in
/// `[0, product(shape))` exactly once.
#[test]
fn test_linear_index_covers_every_offset_once() {
    let shape = vec![3, 4, 2];
    let tensor = Tensor::from_row_major(shape.clone(), &vec![0.0; 24]).unwrap();

    let mut seen = vec![false; 24];
    for i in 0..shape[0] {
        for j in 0..shape[1] {
            for k in 0..shape[2] {
                let offset = tensor.linear_index(&[i, j, k]).unwrap();
                assert!(!seen[offset], "offset {offset} visited twice");
                seen[offset] = true;
            }
        }
    }
    assert!(seen.iter().all(|&visited| visited));
}

#[test]
fn test_column_reads_state_vectors() {
    // Two state components observed at three positions.
    let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
    let tensor = Tensor::from_row_major(vec![2, 3], &data).unwrap();

    assert_eq!(tensor.column(&[0]).unwrap(), &[1.0, 4.0][..]);
    assert_eq!(tensor.column(&[1]).unwrap(), &[2.0, 5.0][..]);
    assert_eq!(tensor.column(&[2]).unwrap(), &[3.0, 6.0][..]);
}

#[test]
fn test_column_length_matches_axis_zero() {
    let shape = vec![3, 4, 2];
    let tensor = Tensor::from_row_major(shape.clone(), &vec![1.5; 24]).unwrap();
    for j in 0..shape[1] {
        for k in 0..shape[2] {
            assert_eq!(tensor.column(&[j, k]).unwrap().len(), shape[0]);
        }
    }
}

#[test]
fn test_from_array2_matches_row_major() {
    let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
    let from_buffer = Tensor::from_row_major(vec![2, 3], &data).unwrap();
    let from_array = Tensor::from_array2(Array2::from_shape_vec((2, 3), data).unwrap());

    for position in 0..3 {
        assert_eq!(
            from_buffer.column(&[position]).unwrap(),
            from_array.column(&[position]).unwrap()
        );
    }
}

#[test]
fn test_from_array1_wraps_a_scalar_series() {
    let tensor = Tensor::from_array1(array![0.5, 1.5, 2.5, 3.5]);
    assert_eq!(tensor.shape(), &[1, 4]);
    for (position, expected) in [0.5, 1.5, 2.5, 3.5].iter().enumerate() {
        assert_eq!(tensor.column(&[position]).unwrap(), &[*expected][..]);
    }
}

#[test]
fn test_from_dyn_three_axes() {
    let values: Vec<f64> = (0..12).map(f64::from).collect();
    let array = ArrayD::from_shape_vec(IxDyn(&[1, 4, 3]), values).unwrap();
    let tensor = Tensor::from_dyn(&array);

    assert_eq!(tensor.axes(), 3);
    for i in 0..4 {
        for j in 0..3 {
            assert_eq!(tensor.column(&[i, j]).unwrap(), &[array[[0, i, j]]][..]);
        }
    }
}

#[test]
fn test_linear_index_arity_mismatch_is_an_error() {
    let tensor = Tensor::from_row_major(vec![2, 3], &[0.0; 6]).unwrap();
    let err = tensor.linear_index(&[1, 1, 1]).unwrap_err();
    assert!(matches!(err, MicrostateError::Index(_)), "{err}");
}

#[test]
fn test_column_arity_mismatch_is_an_error() {
    let tensor = Tensor::from_row_major(vec![2, 3], &[0.0; 6]).unwrap();
    let err = tensor.column(&[1, 1]).unwrap_err();
    assert!(matches!(err, MicrostateError::Index(_)), "{err}");
}

#[test]
fn test_buffer_length_mismatch_is_an_error() {
    let err = Tensor::from_row_major(vec![2, 3], &[0.0; 5]).unwrap_err();
    assert!(matches!(err, MicrostateError::DimensionMismatch(_)), "{err}");
}
