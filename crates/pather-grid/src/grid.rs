/// Dense row-major 2D storage indexed by `(x, y)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T> {
    width: i32,
    height: i32,
    cells: Box<[T]>,
}

impl<T> Grid<T> {
    /// Creates a grid, initializing each cell with `f(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `width` or `height` is negative.
    #[track_caller]
    pub fn new(width: i32, height: i32, mut f: impl FnMut(i32, i32) -> T) -> Self {
        assert!(width >= 0, "width must be non-negative");
        assert!(height >= 0, "height must be non-negative");
        let cells = (0..height)
            .flat_map(move |y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| f(x, y))
            .collect();
        Grid {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn storage(&self) -> &[T] {
        &self.cells
    }

    pub fn storage_mut(&mut self) -> &mut [T] {
        &mut self.cells
    }

    #[inline(always)]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    /// Returns the cell at `(x, y)`, or `None` if it is outside the grid.
    #[inline(always)]
    pub fn get(&self, x: i32, y: i32) -> Option<&T> {
        self.contains(x, y).then(|| &self.cells[self.index(x, y)])
    }

    #[inline(always)]
    pub fn get_mut(&mut self, x: i32, y: i32) -> Option<&mut T> {
        if self.contains(x, y) {
            let index = self.index(x, y);
            Some(&mut self.cells[index])
        } else {
            None
        }
    }

    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> usize {
        self.width as usize * y as usize + x as usize
    }

    #[track_caller]
    #[inline(always)]
    fn bounds_check(&self, x: i32, y: i32) {
        assert!(x >= 0, "x out of bounds");
        assert!(y >= 0, "y out of bounds");
        assert!(x < self.width, "x out of bounds");
        assert!(y < self.height, "y out of bounds");
    }
}

impl<T> std::ops::Index<(i32, i32)> for Grid<T> {
    type Output = T;

    #[track_caller]
    fn index(&self, (x, y): (i32, i32)) -> &T {
        self.bounds_check(x, y);
        &self.cells[self.index(x, y)]
    }
}

impl<T> std::ops::IndexMut<(i32, i32)> for Grid<T> {
    #[track_caller]
    fn index_mut(&mut self, (x, y): (i32, i32)) -> &mut T {
        self.bounds_check(x, y);
        let index = self.index(x, y);
        &mut self.cells[index]
    }
}
