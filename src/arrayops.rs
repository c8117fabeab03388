use num_traits::Float;

/// Generate `n` evenly spaced values from `start` to `end`, both inclusive
pub fn linspace<T: Float>(start: T, end: T, n: usize) -> Vec<T> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / T::from(n - 1).unwrap();
            (0..n)
                .map(|i| {
                    if i == n - 1 {
                        end
                    } else {
                        start + T::from(i).unwrap() * step
                    }
                })
                .collect()
        }
    }
}

/// The smallest and largest values in `values`, or `(inf, -inf)` when empty
pub fn minmax<T: Float>(values: &[T]) -> (T, T) {
    values
        .iter()
        .fold((T::infinity(), T::neg_infinity()), |(min, max), v| {
            (min.min(*v), max.max(*v))
        })
}

/// Find the first index `i` where `values[i] <= values[i - 1]`, if any
pub fn first_non_increasing<T: PartialOrd>(values: &[T]) -> Option<usize> {
    values
        .windows(2)
        .position(|w| !(w[1] > w[0]))
        .map(|i| i + 1)
}

/// Check if the values in `values` are strictly ascending
pub fn is_strictly_increasing<T: PartialOrd>(values: &[T]) -> bool {
    first_non_increasing(values).is_none()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_linspace() {
        let xs = linspace(0.0, 2000.0, 20000);
        assert_eq!(xs.len(), 20000);
        assert_eq!(xs[0], 0.0);
        assert_eq!(xs[19999], 2000.0);
        assert!(is_strictly_increasing(&xs));
        assert_eq!(linspace(1.0f32, 2.0, 1), vec![1.0]);
        assert!(linspace(1.0f32, 2.0, 0).is_empty());
    }

    #[test]
    fn test_minmax() {
        assert_eq!(minmax(&[3.0, -1.0, 7.5, 2.0]), (-1.0, 7.5));
    }

    #[test]
    fn test_increasing() {
        assert!(is_strictly_increasing(&[1.0, 2.0, 3.0]));
        assert_eq!(first_non_increasing(&[1.0, 2.0, 2.0, 3.0]), Some(2));
        assert_eq!(first_non_increasing(&[1.0, 3.0, 2.0]), Some(2));
        assert!(is_strictly_increasing::<f64>(&[]));
    }
}
