/// A dense, row-major 2D grid.
///
/// Unlike a wrapping world map, lookups outside `[0, width) x [0, height)` never alias onto
/// another cell: signed reads return `None` and signed writes are dropped.
#[derive(Clone, Debug, PartialEq)]
pub struct Tilemap<T> {
    pub width: usize,
    pub height: usize,
    data: Vec<T>,
}

impl<T: Clone + Default> Tilemap<T> {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![T::default(); width * height],
        }
    }
}

impl<T: Clone> Tilemap<T> {
    pub fn new_with(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    /// Index into the data array, or `None` when the coordinates fall off the grid.
    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if self.contains(x, y) {
            Some(y as usize * self.width + x as usize)
        } else {
            None
        }
    }

    /// Whether `(x, y)` lies on the grid.
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as u64) < self.width as u64 && (y as u64) < self.height as u64
    }

    pub fn get(&self, x: i64, y: i64) -> Option<&T> {
        self.index(x, y).map(|idx| &self.data[idx])
    }

    /// Store `value` at `(x, y)`. Returns false (and stores nothing) off the grid.
    pub fn set(&mut self, x: i64, y: i64, value: T) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.data[idx] = value;
                true
            }
            None => false,
        }
    }

    /// Fill the entire map with a value.
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    /// Raw row-major storage.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_reads_are_none() {
        let map = Tilemap::new_with(4, 3, 1u8);

        assert_eq!(map.get(0, 0), Some(&1));
        assert_eq!(map.get(3, 2), Some(&1));
        assert_eq!(map.get(-1, 0), None);
        assert_eq!(map.get(0, -1), None);
        assert_eq!(map.get(4, 0), None);
        assert_eq!(map.get(0, 3), None);
    }

    #[test]
    fn test_out_of_bounds_writes_are_dropped() {
        let mut map: Tilemap<u32> = Tilemap::new(3, 3);

        // No wrapping: writing past the right edge must not touch the next row
        assert!(!map.set(3, 0, 7));
        assert!(!map.set(-1, 1, 7));
        assert!(map.as_slice().iter().all(|&v| v == 0));

        assert!(map.set(2, 1, 7));
        assert_eq!(map.as_slice()[5], 7);
    }
}
