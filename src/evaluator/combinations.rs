/// Iterator over all K-element index combinations of `0..n`, in lexicographic order.
///
/// `Combinations::<5>::new(8)` yields the 56 five-card subsets of an eight-card hand,
/// starting at `[0, 1, 2, 3, 4]` and ending at `[3, 4, 5, 6, 7]`.
#[derive(Debug, Clone)]
pub struct Combinations<const K: usize> {
    n: usize,
    indices: [usize; K],
    done: bool,
}

impl<const K: usize> Combinations<K> {
    pub fn new(n: usize) -> Self {
        let mut indices = [0usize; K];
        for (i, slot) in indices.iter_mut().enumerate() {
            *slot = i;
        }
        // C(n, K) is empty when K > n
        Self { n, indices, done: K > n }
    }
}

impl<const K: usize> Iterator for Combinations<K> {
    type Item = [usize; K];

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = self.indices;

        if K == 0 {
            self.done = true;
            return Some(result);
        }

        // Find the rightmost index that can be incremented
        let mut i = K - 1;
        loop {
            if self.indices[i] < self.n - (K - i) {
                self.indices[i] += 1;
                // Reset all indices to the right
                for j in (i + 1)..K {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
                break;
            }

            if i == 0 {
                self.done = true;
                break;
            }
            i -= 1;
        }

        Some(result)
    }
}
