//! Pointer gesture handling: table dragging and relation drawing.
//!
//! The controller never touches the schema. It turns pointer events into
//! [`Effect`]s which the store applies.

use crate::canvas::{CanvasConfig, PendingRelation, Point, node_box};
use crate::model::{Position, Table};

/// What lies under the pointer.
#[derive(Debug, Clone, PartialEq)]
pub enum HitTarget {
    Empty,
    Table(String),
    Handle {
        table_id: String,
        column_id: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum PointerEvent {
    Down { at: Point, target: HitTarget },
    Move { at: Point },
    Up { at: Point, target: HitTarget },
    Leave,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    Dragging {
        table_id: String,
        /// Pointer position relative to the table origin at pointer-down
        offset: Point,
    },
    DrawingRelation {
        from_table_id: String,
        from_column_id: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Select(String),
    MoveTable {
        table_id: String,
        position: Position,
    },
    CreateRelation {
        from_table_id: String,
        from_column_id: Option<String>,
        to_table_id: String,
        to_column_id: Option<String>,
    },
}

#[derive(Debug, Clone, Default)]
pub struct Controller {
    gesture: Gesture,
    pointer: Point,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn pointer(&self) -> Point {
        self.pointer
    }

    /// The in-progress relation, for drawing the rubber-band line.
    pub fn pending_relation(&self) -> Option<PendingRelation> {
        match &self.gesture {
            Gesture::DrawingRelation { from_table_id, .. } => Some(PendingRelation {
                from_table_id: from_table_id.clone(),
                pointer: self.pointer,
            }),
            _ => None,
        }
    }

    pub fn handle(&mut self, event: PointerEvent, tables: &[Table]) -> Option<Effect> {
        match event {
            PointerEvent::Down { at, target } => {
                self.pointer = at;
                self.pointer_down(at, target, tables)
            }
            PointerEvent::Move { at } => {
                self.pointer = at;
                match &self.gesture {
                    Gesture::Dragging { table_id, offset } => Some(Effect::MoveTable {
                        table_id: table_id.clone(),
                        position: Position::new(at.x - offset.x, at.y - offset.y).clamped(),
                    }),
                    _ => None,
                }
            }
            PointerEvent::Up { at, target } => {
                self.pointer = at;
                self.pointer_up(target)
            }
            PointerEvent::Leave => {
                self.gesture = Gesture::Idle;
                None
            }
        }
    }

    fn pointer_down(&mut self, at: Point, target: HitTarget, tables: &[Table]) -> Option<Effect> {
        if self.gesture != Gesture::Idle {
            return None;
        }
        match target {
            HitTarget::Table(table_id) => {
                let table = tables.iter().find(|t| t.id == table_id)?;
                self.gesture = Gesture::Dragging {
                    table_id: table_id.clone(),
                    offset: Point::new(at.x - table.position.x, at.y - table.position.y),
                };
                Some(Effect::Select(table_id))
            }
            HitTarget::Handle { table_id, column_id } => {
                if tables.iter().any(|t| t.id == table_id) {
                    self.gesture = Gesture::DrawingRelation {
                        from_table_id: table_id,
                        from_column_id: column_id,
                    };
                }
                None
            }
            HitTarget::Empty => None,
        }
    }

    fn pointer_up(&mut self, target: HitTarget) -> Option<Effect> {
        match std::mem::take(&mut self.gesture) {
            Gesture::DrawingRelation {
                from_table_id,
                from_column_id,
            } => match target {
                HitTarget::Handle { table_id, column_id } if table_id != from_table_id => {
                    Some(Effect::CreateRelation {
                        from_table_id,
                        from_column_id,
                        to_table_id: table_id,
                        to_column_id: column_id,
                    })
                }
                _ => None,
            },
            _ => None,
        }
    }
}

/// Resolve a surface point to the topmost handle or table under it.
pub fn hit_test(tables: &[Table], at: Point, config: &CanvasConfig) -> HitTarget {
    // Handles sit on the node border and can overlap a neighbour, so check them first.
    let reach = config.handle_radius + 4.0;
    for table in tables.iter().rev() {
        let anchor = node_box(table, config).out_anchor;
        if (at.x - anchor.x).hypot(at.y - anchor.y) <= reach {
            return HitTarget::Handle {
                table_id: table.id.clone(),
                column_id: None,
            };
        }
    }
    tables
        .iter()
        .rev()
        .find(|t| node_box(t, config).contains(at))
        .map(|t| HitTarget::Table(t.id.clone()))
        .unwrap_or(HitTarget::Empty)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables() -> Vec<Table> {
        vec![
            Table::new("1", "users", Position::new(100.0, 100.0)),
            Table::new("2", "posts", Position::new(400.0, 100.0)),
        ]
    }

    fn handle(id: &str) -> HitTarget {
        HitTarget::Handle {
            table_id: id.into(),
            column_id: None,
        }
    }

    #[test]
    fn test_drag_moves_by_offset() {
        let t = tables();
        let mut c = Controller::new();
        let sel = c.handle(
            PointerEvent::Down {
                at: Point::new(130.0, 110.0),
                target: HitTarget::Table("1".into()),
            },
            &t,
        );
        assert_eq!(sel, Some(Effect::Select("1".into())));

        let moved = c.handle(PointerEvent::Move { at: Point::new(230.0, 160.0) }, &t);
        assert_eq!(
            moved,
            Some(Effect::MoveTable {
                table_id: "1".into(),
                position: Position::new(200.0, 150.0)
            })
        );

        c.handle(
            PointerEvent::Up {
                at: Point::new(230.0, 160.0),
                target: HitTarget::Empty,
            },
            &t,
        );
        assert_eq!(c.gesture(), &Gesture::Idle);
        assert_eq!(c.handle(PointerEvent::Move { at: Point::new(0.0, 0.0) }, &t), None);
    }

    #[test]
    fn test_drag_clamps_to_origin() {
        let t = tables();
        let mut c = Controller::new();
        c.handle(
            PointerEvent::Down {
                at: Point::new(100.0, 100.0),
                target: HitTarget::Table("1".into()),
            },
            &t,
        );
        let moved = c.handle(PointerEvent::Move { at: Point::new(-50.0, -50.0) }, &t);
        assert_eq!(
            moved,
            Some(Effect::MoveTable {
                table_id: "1".into(),
                position: Position::new(0.0, 0.0)
            })
        );
    }

    #[test]
    fn test_relation_drawing_completes_on_other_handle() {
        let t = tables();
        let mut c = Controller::new();
        c.handle(
            PointerEvent::Down {
                at: Point::new(260.0, 160.0),
                target: handle("1"),
            },
            &t,
        );
        c.handle(PointerEvent::Move { at: Point::new(300.0, 200.0) }, &t);
        assert_eq!(
            c.pending_relation(),
            Some(PendingRelation {
                from_table_id: "1".into(),
                pointer: Point::new(300.0, 200.0)
            })
        );

        let done = c.handle(
            PointerEvent::Up {
                at: Point::new(560.0, 160.0),
                target: handle("2"),
            },
            &t,
        );
        assert_eq!(
            done,
            Some(Effect::CreateRelation {
                from_table_id: "1".into(),
                from_column_id: None,
                to_table_id: "2".into(),
                to_column_id: None,
            })
        );
        assert_eq!(c.pending_relation(), None);
    }

    #[test]
    fn test_relation_drawing_cancels() {
        let t = tables();
        let mut c = Controller::new();
        for target in [handle("1"), HitTarget::Table("2".into()), HitTarget::Empty] {
            c.handle(
                PointerEvent::Down {
                    at: Point::new(260.0, 160.0),
                    target: handle("1"),
                },
                &t,
            );
            let up = c.handle(
                PointerEvent::Up {
                    at: Point::new(0.0, 0.0),
                    target,
                },
                &t,
            );
            assert_eq!(up, None);
            assert_eq!(c.gesture(), &Gesture::Idle);
        }

        c.handle(
            PointerEvent::Down {
                at: Point::new(260.0, 160.0),
                target: handle("1"),
            },
            &t,
        );
        c.handle(PointerEvent::Leave, &t);
        assert_eq!(c.gesture(), &Gesture::Idle);
    }

    #[test]
    fn test_one_gesture_at_a_time() {
        let t = tables();
        let mut c = Controller::new();
        c.handle(
            PointerEvent::Down {
                at: Point::new(110.0, 110.0),
                target: HitTarget::Table("1".into()),
            },
            &t,
        );
        let second = c.handle(
            PointerEvent::Down {
                at: Point::new(560.0, 160.0),
                target: handle("2"),
            },
            &t,
        );
        assert_eq!(second, None);
        assert!(matches!(c.gesture(), Gesture::Dragging { table_id, .. } if table_id == "1"));
    }

    #[test]
    fn test_unknown_table_is_ignored() {
        let mut c = Controller::new();
        let out = c.handle(
            PointerEvent::Down {
                at: Point::new(0.0, 0.0),
                target: HitTarget::Table("ghost".into()),
            },
            &tables(),
        );
        assert_eq!(out, None);
        assert_eq!(c.gesture(), &Gesture::Idle);
    }

    #[test]
    fn test_hit_test() {
        let t = tables();
        let config = CanvasConfig::default();
        assert_eq!(hit_test(&t, Point::new(262.0, 158.0), &config), handle("1"));
        assert_eq!(hit_test(&t, Point::new(150.0, 120.0), &config), HitTarget::Table("1".into()));
        assert_eq!(hit_test(&t, Point::new(300.0, 120.0), &config), HitTarget::Empty);

        // overlapping nodes: the later (topmost) one wins
        let mut stacked = t.clone();
        stacked[1].position = Position::new(120.0, 110.0);
        assert_eq!(hit_test(&stacked, Point::new(150.0, 130.0), &config), HitTarget::Table("2".into()));
    }
}
