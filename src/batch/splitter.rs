/// Cursor over a row slice handing out chunks of bounded size
///
/// The cursor only moves forward. Once it reaches the end every call to
/// [`RowBatcher::next_chunk`] returns `None` until [`RowBatcher::init`] is
/// called again.
#[derive(Debug)]
pub struct RowBatcher<'a, T> {
    rows: &'a [T],
    offset: usize,
}

impl<T> Default for RowBatcher<'_, T> {
    fn default() -> Self {
        Self {
            rows: &[],
            offset: 0,
        }
    }
}

impl<'a, T> RowBatcher<'a, T> {
    pub fn new(rows: &'a [T]) -> Self {
        Self { rows, offset: 0 }
    }

    /// Restart at the beginning of `rows`
    pub fn init(&mut self, rows: &'a [T]) {
        self.rows = rows;
        self.offset = 0;
    }

    /// Next chunk of at most `max_count` rows, `None` once exhausted
    ///
    /// `max_count` is expected to be positive; callers normalize it first.
    pub fn next_chunk(&mut self, max_count: usize) -> Option<&'a [T]> {
        if self.offset >= self.rows.len() || max_count == 0 {
            return None;
        }
        let end = self.offset.saturating_add(max_count).min(self.rows.len());
        let chunk = &self.rows[self.offset..end];
        self.offset = end;
        Some(chunk)
    }

    /// Drop the rows and reset the cursor
    pub fn clear(&mut self) {
        self.rows = &[];
        self.offset = 0;
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.rows.len() - self.offset
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }
}
