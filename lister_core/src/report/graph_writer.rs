// lister_core/src/report/graph_writer.rs
use crate::constants::{DEFAULT_INDENT, NULL_LABEL};
use crate::ecs::introspect::enumerate_members;
use crate::ecs::reflect::{Reflect, ReflectRef};
use crate::error::ListerError;
use crate::storage::lister_config::ListerConfig;
use std::io::Write;

/// Layout options for a report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportStyle {
    /// One indentation unit, repeated once per depth level.
    pub indent: String,
    /// Write the indentation on the content line. Off by default, which puts
    /// the indentation on a line of its own before every entry.
    pub compact: bool,
    /// Stop at composites that are already being written further up.
    pub detect_cycles: bool,
}

impl Default for ReportStyle {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT.to_string(),
            compact: false,
            detect_cycles: true,
        }
    }
}

impl From<&ListerConfig> for ReportStyle {
    fn from(config: &ListerConfig) -> Self {
        Self {
            indent: config.indent.clone(),
            compact: config.compact,
            detect_cycles: config.detect_cycles,
        }
    }
}

/// Address and type of a composite, two values at the same address
/// with different types are different nodes.
type NodeId = (usize, &'static str);

/// Depth first writer of reflected values.
pub struct GraphWriter<'s, W: Write> {
    out: W,
    style: &'s ReportStyle,
    /// Composites on the current descent path.
    path: Vec<NodeId>,
}

impl<'s, W: Write> GraphWriter<'s, W> {
    pub fn new(out: W, style: &'s ReportStyle) -> Self {
        Self {
            out,
            style,
            path: Vec::new(),
        }
    }

    /// Writes every member of `root` and flushes the sink.
    pub fn write_report(&mut self, root: &dyn Reflect) -> Result<(), ListerError> {
        self.write_fields(root, 0)?;
        self.out.flush()?;
        Ok(())
    }

    /// Gives back the sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Writes one entry per visible member of `obj` at `depth`.
    pub fn write_fields(&mut self, obj: &dyn Reflect, depth: usize) -> Result<(), ListerError> {
        let target = match obj.reflect_ref() {
            ReflectRef::Null => return Ok(()),
            ReflectRef::Composite(inner) => inner,
            _ => obj,
        };

        let id = node_id(target);
        if self.style.detect_cycles && self.path.contains(&id) {
            log::debug!("Cycle at {} (depth {depth}).", target.type_name());
            self.write_indent(depth)?;
            writeln!(self.out, "<cycle: {}>", target.type_name())?;
            return Ok(());
        }

        self.path.push(id);
        let result = self.write_members(target, depth);
        self.path.pop();
        result
    }

    fn write_members(&mut self, target: &dyn Reflect, depth: usize) -> Result<(), ListerError> {
        for member in enumerate_members(target)? {
            self.write_indent(depth)?;
            write!(self.out, "{}: ", member.name)?;

            match member.value {
                ReflectRef::Null => writeln!(self.out, "{NULL_LABEL}")?,
                ReflectRef::Primitive(value) => writeln!(self.out, "{value}")?,
                ReflectRef::Array(elements) => {
                    writeln!(self.out)?;
                    self.write_collection(&elements, depth + 1)?;
                }
                ReflectRef::Composite(value) => {
                    writeln!(self.out)?;
                    self.write_fields(value, depth + 1)?;
                }
            }
        }
        Ok(())
    }

    /// Writes one entry per element at `depth`. Leaves are written inline,
    /// anything else by its runtime type name followed by its members.
    pub fn write_collection(
        &mut self,
        elements: &[&dyn Reflect],
        depth: usize,
    ) -> Result<(), ListerError> {
        for &element in elements {
            self.write_indent(depth)?;

            match element.reflect_ref() {
                ReflectRef::Primitive(value) => writeln!(self.out, "{value}")?,
                ReflectRef::Null => writeln!(self.out, "{NULL_LABEL}")?,
                ReflectRef::Composite(inner) => {
                    writeln!(self.out, "{}", inner.type_name())?;
                    self.write_fields(inner, depth + 1)?;
                }
                ReflectRef::Array(_) => {
                    writeln!(self.out, "{}", element.type_name())?;
                    self.write_fields(element, depth + 1)?;
                }
            }
        }
        Ok(())
    }

    /// Writes `depth` indentation units. Unless compact, the indentation
    /// gets a line of its own.
    fn write_indent(&mut self, depth: usize) -> Result<(), ListerError> {
        for _ in 0..depth {
            self.out.write_all(self.style.indent.as_bytes())?;
        }
        if !self.style.compact {
            writeln!(self.out)?;
        }
        Ok(())
    }
}

fn node_id(value: &dyn Reflect) -> NodeId {
    let addr = std::ptr::from_ref(value).cast::<()>() as usize;
    (addr, value.type_name())
}

/// Writes the report for `root` into a string.
pub fn render_report(root: &dyn Reflect, style: &ReportStyle) -> Result<String, ListerError> {
    let mut writer = GraphWriter::new(Vec::new(), style);
    writer.write_report(root)?;
    Ok(String::from_utf8_lossy(&writer.into_inner()).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use reflect_derive::Reflect;
    use std::cell::{Cell, OnceCell};
    use std::io;
    use std::rc::Rc;

    #[derive(Reflect)]
    struct Counter {
        pub count: i32,
    }

    #[derive(Reflect)]
    struct Point {
        pub x: i32,
    }

    #[derive(Reflect)]
    struct Holder {
        pub name: String,
        pub point: Point,
        pub missing: Option<Point>,
    }

    #[derive(Reflect)]
    struct Numbers {
        pub values: [i32; 3],
    }

    #[derive(Reflect)]
    struct Bag {
        pub items: Vec<Option<Point>>,
        pub grid: Vec<Vec<u8>>,
    }

    #[derive(Reflect)]
    struct Node {
        pub id: u32,
        pub next: OnceCell<Rc<Node>>,
    }

    #[derive(Reflect)]
    struct Grid {
        pub rows: Vec<Option<Vec<u8>>>,
    }

    #[derive(Reflect)]
    struct Link<'a> {
        pub id: u32,
        pub next: Cell<Option<&'a Link<'a>>>,
    }

    #[derive(Reflect)]
    struct Pixel(pub i32, pub &'static str);

    #[derive(Reflect)]
    #[reflect(sealed)]
    #[allow(dead_code)]
    struct Sealed {
        pub inner: u8,
    }

    #[derive(Reflect)]
    struct Outer {
        pub before: u8,
        pub sealed: Sealed,
        pub after: u8,
    }

    fn compact() -> ReportStyle {
        ReportStyle {
            compact: true,
            ..ReportStyle::default()
        }
    }

    #[test]
    fn primitive_field_is_written_inline() {
        let report = render_report(&Counter { count: 5 }, &ReportStyle::default()).unwrap();
        assert_eq!(report, "\ncount: 5\n");
    }

    #[test]
    fn nested_composite_is_one_level_deeper() {
        let holder = Holder {
            name: "root".into(),
            point: Point { x: 1 },
            missing: None,
        };

        let report = render_report(&holder, &ReportStyle::default()).unwrap();
        assert_eq!(
            report,
            "\nname: root\n\npoint: \n  \nx: 1\n\nmissing: null\n"
        );

        let report = render_report(&holder, &compact()).unwrap();
        assert_eq!(report, "name: root\npoint: \n  x: 1\nmissing: null\n");
    }

    #[test]
    fn array_of_primitives_lists_each_element() {
        let numbers = Numbers { values: [1, 2, 3] };

        let report = render_report(&numbers, &ReportStyle::default()).unwrap();
        assert_eq!(report, "\nvalues: \n  \n1\n  \n2\n  \n3\n");

        let report = render_report(&numbers, &compact()).unwrap();
        assert_eq!(report, "values: \n  1\n  2\n  3\n");
    }

    #[test]
    fn composite_elements_show_runtime_type_then_members() {
        let bag = Bag {
            items: vec![Some(Point { x: 7 }), None],
            grid: vec![vec![1, 2]],
        };

        let report = render_report(&bag, &compact()).unwrap();
        let expected = format!(
            "items: \n  {point}\n    x: 7\n  null\ngrid: \n  {grid}\n",
            point = std::any::type_name::<Point>(),
            grid = std::any::type_name::<Vec<u8>>(),
        );
        assert_eq!(report, expected);
    }

    #[test]
    fn optional_array_elements_show_the_array_type() {
        let grid = Grid {
            rows: vec![Some(vec![1]), None],
        };

        let report = render_report(&grid, &compact()).unwrap();
        let expected = format!(
            "rows: \n  {}\n  null\n",
            std::any::type_name::<Vec<u8>>()
        );
        assert_eq!(report, expected);
    }

    #[test]
    fn tuple_fields_are_named_by_position() {
        let report = render_report(&Pixel(1, "a"), &compact()).unwrap();
        assert_eq!(report, "0: 1\n1: a\n");
    }

    #[test]
    fn depth_increases_by_one_per_descent() {
        let holder = Holder {
            name: "root".into(),
            point: Point { x: 1 },
            missing: Some(Point { x: 2 }),
        };

        let report = render_report(&holder, &compact()).unwrap();
        let depths: Vec<(usize, &str)> = report
            .lines()
            .map(|line| {
                let trimmed = line.trim_start();
                ((line.len() - trimmed.len()) / 2, trimmed.trim_end())
            })
            .collect();

        assert_eq!(
            depths,
            vec![
                (0, "name: root"),
                (0, "point:"),
                (1, "x: 1"),
                (0, "missing:"),
                (1, "x: 2"),
            ]
        );
    }

    #[test]
    fn self_reference_ends_with_a_cycle_marker() {
        let node = Rc::new(Node {
            id: 1,
            next: OnceCell::new(),
        });
        let _ = node.next.set(Rc::clone(&node));

        let report = render_report(&*node, &compact()).unwrap();
        let expected = format!(
            "id: 1\nnext: \n  <cycle: {}>\n",
            std::any::type_name::<Node>()
        );
        assert_eq!(report, expected);
    }

    #[test]
    fn back_reference_between_borrowed_nodes_ends_with_a_cycle_marker() {
        let first = Link {
            id: 1,
            next: Cell::new(None),
        };
        let second = Link {
            id: 2,
            next: Cell::new(Some(&first)),
        };
        first.next.set(Some(&second));

        let report = render_report(&first, &compact()).unwrap();
        let expected = format!(
            "id: 1\nnext: \n  id: 2\n  next: \n    <cycle: {}>\n",
            std::any::type_name::<Link<'_>>()
        );
        assert_eq!(report, expected);

        let last = Link {
            id: 3,
            next: Cell::new(None),
        };
        assert_eq!(render_report(&last, &compact()).unwrap(), "id: 3\nnext: null\n");
    }

    #[test]
    fn shared_values_that_are_not_cycles_are_written_each_time() {
        #[derive(Reflect)]
        struct Pair {
            pub left: Rc<Point>,
            pub right: Rc<Point>,
        }

        let shared = Rc::new(Point { x: 3 });
        let pair = Pair {
            left: Rc::clone(&shared),
            right: shared,
        };

        let report = render_report(&pair, &compact()).unwrap();
        assert_eq!(report, "left: \n  x: 3\nright: \n  x: 3\n");
    }

    #[test]
    fn sealed_member_aborts_with_access_denied() {
        let outer = Outer {
            before: 1,
            sealed: Sealed { inner: 2 },
            after: 3,
        };

        let style = compact();
        let mut writer = GraphWriter::new(Vec::new(), &style);
        let err = writer.write_report(&outer).unwrap_err();
        assert!(matches!(
            err,
            ListerError::AccessDenied { type_name } if type_name == std::any::type_name::<Sealed>()
        ));

        // Whatever was written before the failure stays written
        let partial = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(partial, "before: 1\nsealed: \n");
    }

    #[test]
    fn custom_indent_is_repeated_per_level() {
        let style = ReportStyle {
            indent: "\t".into(),
            compact: true,
            detect_cycles: true,
        };
        let report = render_report(&Numbers { values: [4, 5, 6] }, &style).unwrap();
        assert_eq!(report, "values: \n\t4\n\t5\n\t6\n");
    }

    struct FailingSink;

    impl io::Write for FailingSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn sink_failures_surface_as_io_errors() {
        let style = ReportStyle::default();
        let mut writer = GraphWriter::new(FailingSink, &style);
        let err = writer.write_report(&Counter { count: 1 }).unwrap_err();
        assert!(matches!(err, ListerError::Io(_)));
    }
}
