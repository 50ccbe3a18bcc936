//! Declarative fields and children for document elements.
//!
//! An element type is a typed handle onto one node of a [Document]. Its
//! schema is a static table of [Field] descriptors, each exposing one piece
//! of node state either as an attribute or as the text of a dedicated child
//! element, optionally restricted to a set of legal values. The table also
//! lists the [Composition]s: which child element types the node can create
//! and attach.
//!
//! Element types are declared with the [element!] macro, which generates the
//! table together with a typed getter, setter and `create_*` method for
//! every entry.

use crate::core::document::{Document, NodeId};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Storage {
    Attribute,
    Child,
}

/// A named, validated accessor onto one piece of an element's state.
#[derive(Debug, PartialEq)]
pub struct Field {
    /// Name of the attribute or child element in the document.
    pub name: &'static str,
    /// Name of the generated accessor method.
    pub accessor: &'static str,
    pub storage: Storage,
    /// Legal values; empty when any value is accepted.
    pub values: &'static [&'static str],
}

impl Field {
    /// Verifies `value` is a member of the legal values, if there are any.
    pub fn check(&self, value: &str) -> Result<()> {
        if self.values.is_empty() == true || self.values.contains(&value) == true {
            Ok(())
        } else {
            Err(Error::InvalidValue {
                value: value.to_string(),
                field: self.name.to_string(),
                allowed: self.values.iter().map(|v| v.to_string()).collect(),
            })
        }
    }

    /// Reads the field from `node`, or an empty string if it was never written.
    pub fn get<'d>(&self, doc: &'d Document, node: NodeId) -> &'d str {
        match self.storage {
            Storage::Attribute => doc.get_attribute(node, self.name),
            Storage::Child => doc
                .bound_child(node, self.name)
                .and_then(|c| doc.text(c))
                .unwrap_or_default(),
        }
    }

    /// Writes the field on `node`.
    ///
    /// `None` removes an attribute and leaves a child element untouched. The
    /// value is validated before anything is modified. A child-element field
    /// creates its backing element on the first non-empty write and reuses
    /// it on every write after.
    pub fn set(&self, doc: &mut Document, node: NodeId, value: Option<&str>) -> Result<()> {
        let value = match value {
            Some(v) => v,
            None => {
                if self.storage == Storage::Attribute {
                    doc.set_attribute(node, self.name, None);
                }
                return Ok(());
            }
        };
        self.check(value)?;
        match self.storage {
            Storage::Attribute => doc.set_attribute(node, self.name, Some(value)),
            Storage::Child => {
                if value.is_empty() == true {
                    return Ok(());
                }
                let child = match doc.bound_child(node, self.name) {
                    Some(c) => c,
                    None => {
                        let c = doc.create_child(node, self.name);
                        doc.bind_child(node, self.name, c);
                        c
                    }
                };
                doc.set_text(child, value);
            }
        }
        Ok(())
    }
}

/// Declares that a container element can create and attach a child element.
#[derive(Debug, PartialEq)]
pub struct Composition {
    /// Suffix of the generated `create_*` method.
    pub verb: &'static str,
    pub tag: &'static str,
}

/// A typed handle onto a node of a [Document].
pub trait Element: Copy {
    const TAG: &'static str;
    const SCHEMA: &'static [Field];
    const CHILDREN: &'static [Composition];

    fn from_id(id: NodeId) -> Self;

    fn id(&self) -> NodeId;

    /// Looks up a field of this element by its document name.
    fn field(name: &str) -> Option<&'static Field> {
        Self::SCHEMA.iter().find(|f| f.name == name)
    }
}

/// An element that can be constructed as the child of another element.
pub trait Create: Element {
    type Args;

    /// Fills in a freshly attached node from the constructor arguments.
    ///
    /// Only the new node and nodes created beneath it may be modified; they
    /// are discarded again when this returns an error.
    fn init(&self, doc: &mut Document, args: Self::Args) -> Result<()>;
}

/// Creates a `C` element from `args`, appends it to `parent` and returns it.
///
/// When `C::init` fails the document is left as it was before the call.
pub fn create<P: Element, C: Create>(doc: &mut Document, parent: &P, args: C::Args) -> Result<C> {
    let mark = doc.len();
    let child = C::from_id(doc.create_child(parent.id(), C::TAG));
    if let Err(e) = child.init(doc, args) {
        doc.truncate(mark);
        return Err(e);
    }
    Ok(child)
}

/// Reads the field named `name` on `element`.
pub fn get_by_name<'d, E: Element>(doc: &'d Document, element: &E, name: &str) -> Result<&'d str> {
    Ok(lookup::<E>(name)?.get(doc, element.id()))
}

/// Writes the field named `name` on `element` with the same validation as
/// the generated setter.
pub fn set_by_name<E: Element>(
    doc: &mut Document,
    element: &E,
    name: &str,
    value: Option<&str>,
) -> Result<()> {
    lookup::<E>(name)?.set(doc, element.id(), value)
}

fn lookup<E: Element>(name: &str) -> Result<&'static Field> {
    E::field(name).ok_or_else(|| Error::UnknownField {
        element: E::TAG.to_string(),
        field: name.to_string(),
    })
}

#[doc(hidden)]
macro_rules! __storage {
    (attr) => {
        $crate::core::schema::Storage::Attribute
    };
    (child) => {
        $crate::core::schema::Storage::Child
    };
}

/// Declares an element type.
///
/// ```ignore
/// element! {
///     /// A single source file compiled by the C/C++ compiler.
///     pub struct ClCompile("ClCompile") {
///         attr include = "Include";
///         child compile_as = "CompileAs" in ["Default", "CompileAsC", "CompileAsCpp"];
///     }
///     compose {
///         custom_build_step: CustomBuildStep,
///     }
/// }
/// ```
///
/// This generates:
/// - the handle type `ClCompile` implementing [Element]
/// - `include(&doc)` / `set_include(&mut doc, value)` and likewise for every field
/// - `create_custom_build_step(&mut doc, args)` for every composition entry
macro_rules! element {
    (
        $(#[$meta:meta])*
        pub struct $name:ident($tag:literal) {
            $( $kind:ident $acc:ident = $ext:literal $(in [$($v:literal),* $(,)?])? ; )*
        }
        $(compose { $($verb:ident: $child:ident),* $(,)? })?
    ) => {
        ::paste::paste! {
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq)]
            pub struct $name($crate::core::document::NodeId);

            #[allow(dead_code)]
            impl $name {
                $(
                    const [<FIELD_ $acc:upper>]: $crate::core::schema::Field = $crate::core::schema::Field {
                        name: $ext,
                        accessor: stringify!($acc),
                        storage: $crate::core::schema::__storage!($kind),
                        values: &[$($($v),*)?],
                    };

                    #[doc = concat!("Reads `", $ext, "`, or an empty string if unset.")]
                    pub fn $acc<'d>(&self, doc: &'d $crate::core::document::Document) -> &'d str {
                        Self::[<FIELD_ $acc:upper>].get(doc, self.0)
                    }

                    #[doc = concat!("Writes `", $ext, "`; `None` clears it.")]
                    pub fn [<set_ $acc>](
                        &self,
                        doc: &mut $crate::core::document::Document,
                        value: Option<&str>,
                    ) -> $crate::error::Result<()> {
                        Self::[<FIELD_ $acc:upper>].set(doc, self.0, value)
                    }
                )*

                $($(
                    #[doc = concat!("Creates a `", stringify!($child), "` and appends it to this element.")]
                    pub fn [<create_ $verb>](
                        &self,
                        doc: &mut $crate::core::document::Document,
                        args: <$child as $crate::core::schema::Create>::Args,
                    ) -> $crate::error::Result<$child> {
                        $crate::core::schema::create(doc, self, args)
                    }
                )*)?
            }

            impl $crate::core::schema::Element for $name {
                const TAG: &'static str = $tag;
                const SCHEMA: &'static [$crate::core::schema::Field] = &[$($name::[<FIELD_ $acc:upper>]),*];
                const CHILDREN: &'static [$crate::core::schema::Composition] = &[$($(
                    $crate::core::schema::Composition {
                        verb: stringify!($verb),
                        tag: <$child as $crate::core::schema::Element>::TAG,
                    }
                ),*)?];

                fn from_id(id: $crate::core::document::NodeId) -> Self {
                    Self(id)
                }

                fn id(&self) -> $crate::core::document::NodeId {
                    self.0
                }
            }
        }
    };
}

pub(crate) use __storage;
pub(crate) use element;

#[cfg(test)]
mod test {
    use super::*;

    element! {
        pub struct Widget("Widget") {
            attr label = "Label";
            attr mode = "Mode" in ["Fast", "Slow"];
            child name = "Name";
            child level = "Level" in ["Low", "High"];
        }
        compose {
            part: Part,
        }
    }

    element! {
        pub struct Part("Part") {
            attr include = "Include";
        }
    }

    impl Create for Part {
        type Args = String;

        fn init(&self, doc: &mut Document, args: Self::Args) -> Result<()> {
            self.set_include(doc, Some(&args))
        }
    }

    element! {
        pub struct Gadget("Gadget") {
            child name = "Name";
            attr mode = "Mode" in ["Fast", "Slow"];
        }
    }

    impl Create for Gadget {
        type Args = (String, String);

        fn init(&self, doc: &mut Document, args: Self::Args) -> Result<()> {
            self.set_name(doc, Some(args.0.as_str()))?;
            self.set_mode(doc, Some(args.1.as_str()))
        }
    }

    fn widget() -> (Document, Widget) {
        let doc = Document::new(Widget::TAG);
        let w = Widget::from_id(doc.root());
        (doc, w)
    }

    #[test]
    fn schema_table() {
        assert_eq!(Widget::SCHEMA.len(), 4);
        assert_eq!(Widget::field("Mode").unwrap().accessor, "mode");
        assert_eq!(Widget::field("Level").unwrap().storage, Storage::Child);
        assert_eq!(Widget::field("Level").unwrap().values, &["Low", "High"]);
        assert_eq!(Widget::field("Missing"), None);
        assert_eq!(
            Widget::CHILDREN,
            &[Composition {
                verb: "part",
                tag: "Part"
            }]
        );
        assert_eq!(Part::CHILDREN.len(), 0);
    }

    #[test]
    fn unset_fields_read_empty() {
        let (doc, w) = widget();
        assert_eq!(w.label(&doc), "");
        assert_eq!(w.name(&doc), "");
    }

    #[test]
    fn restricted_attribute_rejects_without_mutation() {
        let (mut doc, w) = widget();
        w.set_mode(&mut doc, Some("Fast")).unwrap();
        let before = doc.clone();
        assert_eq!(
            w.set_mode(&mut doc, Some("Medium")),
            Err(Error::InvalidValue {
                value: String::from("Medium"),
                field: String::from("Mode"),
                allowed: vec![String::from("Fast"), String::from("Slow")],
            })
        );
        assert_eq!(doc, before);
        assert_eq!(w.mode(&doc), "Fast");
        w.set_mode(&mut doc, Some("Slow")).unwrap();
        assert_eq!(w.mode(&doc), "Slow");
    }

    #[test]
    fn restricted_child_rejects_without_mutation() {
        let (mut doc, w) = widget();
        let before = doc.clone();
        assert_eq!(w.set_level(&mut doc, Some("Max")).is_err(), true);
        assert_eq!(doc, before);
        assert_eq!(doc.children(w.id()).len(), 0);
    }

    #[test]
    fn absent_removes_attribute() {
        let (mut doc, w) = widget();
        w.set_label(&mut doc, Some("Globals")).unwrap();
        assert_eq!(doc.serialize().contains("Label="), true);
        w.set_label(&mut doc, None).unwrap();
        assert_eq!(w.label(&doc), "");
        assert_eq!(doc.serialize().contains("Label="), false);
        // clearing a restricted attribute that was never set is fine
        w.set_mode(&mut doc, None).unwrap();
    }

    #[test]
    fn child_field_reuses_backing_element() {
        let (mut doc, w) = widget();
        for i in 0..5 {
            w.set_name(&mut doc, Some(&format!("n{}", i))).unwrap();
        }
        assert_eq!(w.name(&doc), "n4");
        let backing: Vec<NodeId> = doc
            .children(w.id())
            .iter()
            .copied()
            .filter(|c| doc.tag(*c) == "Name")
            .collect();
        assert_eq!(backing.len(), 1);
        assert_eq!(doc.text(backing[0]), Some("n4"));
    }

    #[test]
    fn child_field_absent_and_empty_are_no_ops() {
        let (mut doc, w) = widget();
        w.set_name(&mut doc, None).unwrap();
        w.set_name(&mut doc, Some("")).unwrap();
        assert_eq!(doc.children(w.id()).len(), 0);
        w.set_name(&mut doc, Some("kept")).unwrap();
        w.set_name(&mut doc, None).unwrap();
        w.set_name(&mut doc, Some("")).unwrap();
        assert_eq!(w.name(&doc), "kept");
    }

    #[test]
    fn composition_attaches_in_call_order() {
        let (mut doc, w) = widget();
        let a = w.create_part(&mut doc, String::from("a.cpp")).unwrap();
        let b = w.create_part(&mut doc, String::from("b.cpp")).unwrap();
        assert_eq!(doc.children(w.id()), &[a.id(), b.id()]);
        assert_eq!(doc.parent(a.id()), Some(w.id()));
        assert_eq!(a.include(&doc), "a.cpp");
        assert_eq!(b.include(&doc), "b.cpp");
    }

    #[test]
    fn failed_creation_is_discarded() {
        let (mut doc, w) = widget();
        w.set_name(&mut doc, Some("widget")).unwrap();
        let before = doc.clone();
        let args = (String::from("g"), String::from("Medium"));
        assert_eq!(create::<Widget, Gadget>(&mut doc, &w, args).is_err(), true);
        assert_eq!(doc, before);

        let args = (String::from("g"), String::from("Fast"));
        let g = create::<Widget, Gadget>(&mut doc, &w, args).unwrap();
        assert_eq!(g.name(&doc), "g");
        assert_eq!(w.name(&doc), "widget");
        assert_eq!(doc.children(w.id()).len(), 2);
    }

    #[test]
    fn by_name_access() {
        let (mut doc, w) = widget();
        set_by_name(&mut doc, &w, "Level", Some("High")).unwrap();
        assert_eq!(w.level(&doc), "High");
        assert_eq!(get_by_name(&doc, &w, "Level"), Ok("High"));
        assert_eq!(
            set_by_name(&mut doc, &w, "Level", Some("Max")).is_err(),
            true
        );
        assert_eq!(
            set_by_name(&mut doc, &w, "Color", Some("red")),
            Err(Error::UnknownField {
                element: String::from("Widget"),
                field: String::from("Color"),
            })
        );
    }
}
