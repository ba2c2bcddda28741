//! Serialization of the three representations (requires the `serde` feature)

#![cfg(feature = "serde")]

use math_audio_matrix::{DenseMatrix, Matrix, MatrixMut, PivotMatrix, SparseMatrix};

#[test]
fn dense_serializes_packed() {
    let m = DenseMatrix::from_vec((0..9).map(f64::from).collect(), 3, 3).unwrap();
    let w = m.window(1, 1, 2, 2).unwrap();
    let json = serde_json::to_string(&w).unwrap();
    assert_eq!(json, r#"{"rows":2,"cols":2,"data":[4.0,5.0,7.0,8.0]}"#);
    let back: DenseMatrix = serde_json::from_str(&json).unwrap();
    assert_eq!(back, w);
    assert_eq!(back.step(), 2);
}

#[test]
fn dense_rejects_bad_length() {
    let res = serde_json::from_str::<DenseMatrix>(r#"{"rows":2,"cols":2,"data":[1.0]}"#);
    assert!(res.is_err());
}

#[test]
fn sparse_and_pivot_survive() {
    let mut s = SparseMatrix::zeros(2, 3);
    s.set(1, 2, 7.5).unwrap();
    let back: SparseMatrix = serde_json::from_str(&serde_json::to_string(&s).unwrap()).unwrap();
    assert_eq!(back, s);

    let p = PivotMatrix::new(vec![2, 0, 1]).unwrap();
    let json = serde_json::to_string(&p).unwrap();
    assert_eq!(json, "[2,0,1]");
    let back: PivotMatrix = serde_json::from_str(&json).unwrap();
    assert_eq!(back.sign(), p.sign());
    assert!(serde_json::from_str::<PivotMatrix>("[0,0]").is_err());
}

#[test]
fn sparse_serializes_packed_window() {
    let mut s = SparseMatrix::zeros(3, 3);
    s.set(0, 0, 1.0).unwrap();
    s.set(2, 2, 9.0).unwrap();
    let w = s.into_window(1, 1, 2, 2).unwrap();
    let json = serde_json::to_string(&w).unwrap();
    assert_eq!(json, r#"{"rows":2,"cols":2,"elements":{"3":9.0}}"#);
    let back: SparseMatrix = serde_json::from_str(&json).unwrap();
    assert_eq!(back, w);
    assert_eq!(back.nnz(), 1);
}

#[test]
fn sparse_rejects_out_of_range_keys() {
    let res = serde_json::from_str::<SparseMatrix>(
        r#"{"rows":2,"cols":2,"elements":{"0":1.0,"99":1.0}}"#,
    );
    assert!(res.is_err());
}

#[test]
fn sparse_drops_stored_zeros_on_load() {
    let back: SparseMatrix =
        serde_json::from_str(r#"{"rows":2,"cols":2,"elements":{"0":0.0,"3":2.0}}"#).unwrap();
    assert!(!back.exist(0, 0).unwrap());
    assert_eq!(back.nnz(), 1);
    assert_eq!(back.array(), vec![0.0, 0.0, 0.0, 2.0]);
}

#[test]
fn sparse_ignores_layout_fields() {
    // `step` and `offset` are derived on load, never read from the payload.
    let back: SparseMatrix = serde_json::from_str(
        r#"{"rows":1,"cols":2,"elements":{"1":4.0},"step":0,"offset":7}"#,
    )
    .unwrap();
    assert_eq!(back.nnz(), 1);
    assert_eq!(back.get(0, 1).unwrap(), 4.0);
}
