use complex_sparse::prelude::*;

fn main() -> Result<(), ComplexSparseError> {
    // 4x4 complex system with a few structural zeros.
    let mut a = SparseMatrix::new(MatrixMode::Complex, 4, 4);
    let entries = [
        (0, 0, CScalar::new(5.0, 2.0)),
        (2, 0, CScalar::new(4.0, 9.0)),
        (3, 0, CScalar::new(3.2, 1.0)),
        (0, 1, CScalar::new(3.0, 1.0)),
        (1, 1, CScalar::new(-2.0, -2.0)),
        (2, 1, CScalar::new(9.0, -4.5)),
        (0, 2, CScalar::new(2.0, -3.0)),
        (1, 2, CScalar::new(1.0, 1.5)),
        (3, 2, CScalar::new(2.3, 0.0)),
        (2, 3, CScalar::new(6.0, 2.3)),
    ];
    for (i, j, z) in entries {
        a.try_set_complex(i, j, z)?;
    }
    println!("A =\n{a}");

    let csc = a.to_csc()?;
    println!("col_offsets: {:?}", csc.col_offsets());
    println!("row_indices: {:?}", csc.row_indices());

    let x = [
        CScalar::new(2.5, 3.5),
        CScalar::new(1.6, -2.0),
        CScalar::new(1.0, 4.2),
        CScalar::new(0.0, -6.3),
    ];
    let y = multiply_complex(&a, &x)?;
    println!("y = A x = {y:?}");

    // QR solve recovers x
    let solved = solve_complex(&a, &y)?;
    println!("solved x = {solved:?}");
    Ok(())
}
