/// Encoded copy of the full pixel buffer at one moment
#[derive(Clone, PartialEq, Eq)]
pub struct Snapshot {
    png: Vec<u8>,
    width: u32,
    height: u32,
}

impl Snapshot {
    pub fn new(png: Vec<u8>, width: u32, height: u32) -> Self {
        Self { png, width, height }
    }

    pub fn png(&self) -> &[u8] {
        &self.png
    }

    pub fn size(&self) -> [u32; 2] {
        [self.width, self.height]
    }
}

impl std::fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Snapshot")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.png.len())
            .finish()
    }
}

/// Manages the raster history used for undo/redo.
///
/// Entries form an ordered sequence with a cursor. The cursor is `None` when
/// nothing has been recorded (the `-1` position) and otherwise always points
/// at an existing entry.
#[derive(Debug, Default)]
pub struct SnapshotHistory {
    entries: Vec<Snapshot>,
    index: Option<usize>,
}

impl SnapshotHistory {
    /// Creates a new empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a snapshot after the cursor, dropping any redo tail
    pub fn push(&mut self, snapshot: Snapshot) {
        let keep = self.index.map_or(0, |index| index + 1);
        self.entries.truncate(keep);
        self.entries.push(snapshot);
        self.index = Some(self.entries.len() - 1);
    }

    /// Moves the cursor back one entry. No-op at the first entry.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        let index = self.index.filter(|&index| index > 0)? - 1;
        self.index = Some(index);
        self.entries.get(index)
    }

    /// Moves the cursor forward one entry. No-op at the tail.
    pub fn redo(&mut self) -> Option<&Snapshot> {
        let next = self.index.map_or(0, |index| index + 1);
        if next >= self.entries.len() {
            return None;
        }
        self.index = Some(next);
        self.entries.get(next)
    }

    pub fn can_undo(&self) -> bool {
        self.index.is_some_and(|index| index > 0)
    }

    pub fn can_redo(&self) -> bool {
        self.index.map_or(0, |index| index + 1) < self.entries.len()
    }

    pub fn current(&self) -> Option<&Snapshot> {
        self.index.and_then(|index| self.entries.get(index))
    }

    /// Cursor position, `None` for an empty history
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forget everything
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index = None;
    }
}
