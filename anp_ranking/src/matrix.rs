/// A square matrix of reals, stored row by row.
#[derive(PartialEq, Debug, Clone)]
pub struct Matrix {
    n: usize,
    data: Vec<f64>,
}

impl Matrix {
    pub fn filled(n: usize, value: f64) -> Matrix {
        Matrix {
            n,
            data: vec![value; n * n],
        }
    }

    #[cfg(test)]
    pub fn identity(n: usize) -> Matrix {
        let mut m = Matrix::filled(n, 0.0);
        for i in 0..n {
            m.set(i, i, 1.0);
        }
        m
    }

    /// None if the rows do not form a square.
    pub fn from_rows(rows: &[Vec<f64>]) -> Option<Matrix> {
        let n = rows.len();
        if rows.iter().any(|r| r.len() != n) {
            return None;
        }
        Some(Matrix {
            n,
            data: rows.iter().flatten().cloned().collect(),
        })
    }

    pub fn size(&self) -> usize {
        self.n
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.n + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.n + col] = value;
    }

    pub fn column(&self, col: usize) -> Vec<f64> {
        (0..self.n).map(|row| self.get(row, col)).collect()
    }

    pub fn column_sums(&self) -> Vec<f64> {
        (0..self.n)
            .map(|col| (0..self.n).map(|row| self.get(row, col)).sum())
            .collect()
    }

    pub fn multiply(&self, other: &Matrix) -> Matrix {
        assert_eq!(self.n, other.n, "matrix sizes differ");
        let n = self.n;
        let mut res = Matrix::filled(n, 0.0);
        for i in 0..n {
            for k in 0..n {
                let a = self.get(i, k);
                if a == 0.0 {
                    continue;
                }
                for j in 0..n {
                    res.data[i * n + j] += a * other.get(k, j);
                }
            }
        }
        res
    }

    pub fn max_abs_diff(&self, other: &Matrix) -> f64 {
        self.data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max)
    }
}
