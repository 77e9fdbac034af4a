use super::FilterError;

/// Cell-to-cell adjacency of a mesh in compressed row form.
///
/// Each cell lists its face neighbours and how many of its faces lie on the
/// domain boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connectivity {
    offsets: Vec<usize>,
    neighbours: Vec<usize>,
    boundary_faces: Vec<usize>,
}

impl Connectivity {
    /// Builds the adjacency from internal faces given as `owner`/`neighbour`
    /// pairs, plus the owner cell of every boundary face.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidConnectivity`] if the face lists differ
    /// in length, a face references a cell outside `0..n_cells`, or a face
    /// connects a cell to itself.
    pub fn from_faces(
        n_cells: usize,
        owner: &[usize],
        neighbour: &[usize],
        boundary_owner: &[usize],
    ) -> Result<Self, FilterError> {
        if owner.len() != neighbour.len() {
            return Err(FilterError::InvalidConnectivity {
                context: format!(
                    "{} owners for {} neighbours",
                    owner.len(),
                    neighbour.len()
                ),
            });
        }

        let out_of_range = |cell: usize| FilterError::InvalidConnectivity {
            context: format!("cell {cell} is outside a mesh of {n_cells} cells"),
        };

        let mut lists = vec![Vec::new(); n_cells];
        for (face, (&a, &b)) in owner.iter().zip(neighbour).enumerate() {
            if a >= n_cells {
                return Err(out_of_range(a));
            }
            if b >= n_cells {
                return Err(out_of_range(b));
            }
            if a == b {
                return Err(FilterError::InvalidConnectivity {
                    context: format!("face {face} connects cell {a} to itself"),
                });
            }
            lists[a].push(b);
            lists[b].push(a);
        }

        let mut boundary_faces = vec![0; n_cells];
        for &cell in boundary_owner {
            if cell >= n_cells {
                return Err(out_of_range(cell));
            }
            boundary_faces[cell] += 1;
        }

        Ok(Self::from_lists(lists, boundary_faces))
    }

    /// A structured `nx × ny × nz` block with cells numbered x-fastest.
    ///
    /// Directions with a single cell are treated as empty (2-D or 1-D
    /// meshes) and contribute no boundary faces.
    #[must_use]
    pub fn cartesian(nx: usize, ny: usize, nz: usize) -> Self {
        let index = |i: usize, j: usize, k: usize| i + nx * (j + ny * k);
        let n_cells = nx * ny * nz;

        let mut lists = vec![Vec::new(); n_cells];
        let mut boundary_faces = vec![0; n_cells];

        for k in 0..nz {
            for j in 0..ny {
                for i in 0..nx {
                    let cell = index(i, j, k);
                    for (pos, n, step) in [(i, nx, (1, 0, 0)), (j, ny, (0, 1, 0)), (k, nz, (0, 0, 1))]
                    {
                        if n == 1 {
                            continue;
                        }
                        if pos > 0 {
                            lists[cell].push(index(i - step.0, j - step.1, k - step.2));
                        } else {
                            boundary_faces[cell] += 1;
                        }
                        if pos + 1 < n {
                            lists[cell].push(index(i + step.0, j + step.1, k + step.2));
                        } else {
                            boundary_faces[cell] += 1;
                        }
                    }
                }
            }
        }

        Self::from_lists(lists, boundary_faces)
    }

    fn from_lists(lists: Vec<Vec<usize>>, boundary_faces: Vec<usize>) -> Self {
        let mut offsets = Vec::with_capacity(lists.len() + 1);
        offsets.push(0);
        let mut neighbours = Vec::with_capacity(lists.iter().map(Vec::len).sum());
        for list in lists {
            neighbours.extend(list);
            offsets.push(neighbours.len());
        }
        Self {
            offsets,
            neighbours,
            boundary_faces,
        }
    }

    #[must_use]
    pub fn n_cells(&self) -> usize {
        self.boundary_faces.len()
    }

    /// Face neighbours of `cell`.
    #[must_use]
    pub fn neighbours(&self, cell: usize) -> &[usize] {
        &self.neighbours[self.offsets[cell]..self.offsets[cell + 1]]
    }

    /// Number of faces of `cell` on the domain boundary.
    #[must_use]
    pub fn boundary_faces(&self, cell: usize) -> usize {
        self.boundary_faces[cell]
    }

    #[must_use]
    pub fn is_boundary(&self, cell: usize) -> bool {
        self.boundary_faces[cell] > 0
    }
}
