//! Tree transforms applied between parsing and writing.
//!
//! Run order: [`promote_titles`], [`assign_ids`], [`resolve_references`].

use std::collections::{HashMap, HashSet};

use crate::nodes::{
    Document, Inline, Node, RefTarget, SystemMessage, Title, normalize_name, plain_text,
};
use crate::util::slugify;

/// Maximum chain length of indirect targets (`.. _a: b_`).
const MAX_INDIRECT: usize = 16;

/// Run every transform in order.
pub fn apply(document: &mut Document, doctitle: bool) {
    if doctitle {
        promote_titles(document);
    }
    assign_ids(document);
    resolve_references(document);
}

/// Promote a lone leading top-level section to the document title, then
/// repeat once for the subtitle.
///
/// Only comments, targets and system messages may precede the section, and
/// nothing may follow it.
pub fn promote_titles(document: &mut Document) {
    if let Some(title) = promote(&mut document.children) {
        document.title = Some(title);
        document.subtitle = promote(&mut document.children);
    }
}

fn promote(children: &mut Vec<Node>) -> Option<Title> {
    let index = children
        .iter()
        .position(|n| !matches!(n, Node::Comment(_) | Node::Target(_) | Node::SystemMessage(_)))?;
    if index + 1 != children.len() || !matches!(children[index], Node::Section(_)) {
        return None;
    }
    let Node::Section(section) = children.remove(index) else {
        return None;
    };
    children.extend(section.children);
    Some(Title {
        id: section.id,
        inlines: section.title,
    })
}

/// Unique id allocator.
#[derive(Default)]
struct Ids {
    used: HashSet<String>,
}

impl Ids {
    fn unique(&mut self, text: &str) -> String {
        let mut base = slugify(text);
        if base.is_empty() {
            base = "section".to_owned();
        }
        if self.used.insert(base.clone()) {
            return base;
        }
        let mut n = 1;
        loop {
            let candidate = format!("{base}-{n}");
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }
}

/// Give the title, subtitle and every section a unique slug id.
///
/// Ids of explicit internal targets and named blocks are reserved first so
/// that sections never collide with them.
pub fn assign_ids(document: &mut Document) {
    let mut ids = Ids::default();
    reserve_explicit(&document.children, &mut ids.used);

    for title in [&mut document.title, &mut document.subtitle]
        .into_iter()
        .flatten()
    {
        title.id = ids.unique(&plain_text(&title.inlines));
    }
    assign_section_ids(&mut document.children, &mut ids);
}

fn reserve_explicit(nodes: &[Node], used: &mut HashSet<String>) {
    for node in nodes {
        match node {
            Node::Target(target) if target.refuri.is_none() => {
                used.insert(target.id.clone());
            }
            Node::LiteralBlock(block) => {
                if let Some(id) = &block.id {
                    used.insert(id.clone());
                }
            }
            _ => {}
        }
        for_each_child_list(node, &mut |children| reserve_explicit(children, used));
    }
}

fn assign_section_ids(nodes: &mut [Node], ids: &mut Ids) {
    for node in nodes {
        if let Node::Section(section) = node {
            section.id = ids.unique(&plain_text(&section.title));
            assign_section_ids(&mut section.children, ids);
        }
    }
}

/// Resolved value of an explicit target.
enum Explicit {
    Uri(String),
    Internal(String),
    /// Indirect target naming another target.
    Alias(String),
}

#[derive(Default)]
struct Targets {
    explicit: HashMap<String, Explicit>,
    implicit: HashMap<String, String>,
}

impl Targets {
    fn collect(document: &Document) -> Self {
        let mut targets = Self::default();
        for title in [&document.title, &document.subtitle].into_iter().flatten() {
            targets
                .implicit
                .entry(normalize_name(&plain_text(&title.inlines)))
                .or_insert_with(|| title.id.clone());
        }
        targets.visit(&document.children);
        targets
    }

    fn visit(&mut self, nodes: &[Node]) {
        for node in nodes {
            match node {
                Node::Target(target) => {
                    let value = match &target.refuri {
                        Some(uri) => match uri.strip_suffix('_') {
                            Some(name) if !name.ends_with('\\') => {
                                Explicit::Alias(normalize_name(name.trim_matches('`')))
                            }
                            _ => Explicit::Uri(uri.clone()),
                        },
                        None => Explicit::Internal(target.id.clone()),
                    };
                    self.explicit.insert(target.name.clone(), value);
                }
                Node::Section(section) => {
                    self.implicit
                        .entry(section.refname())
                        .or_insert_with(|| section.id.clone());
                }
                _ => {}
            }
            for_each_child_list(node, &mut |children| self.visit(children));
        }
    }

    fn lookup(&self, name: &str) -> Option<RefTarget> {
        let mut name = name;
        for _ in 0..MAX_INDIRECT {
            match self.explicit.get(name) {
                Some(Explicit::Uri(uri)) => return Some(RefTarget::Uri(uri.clone())),
                Some(Explicit::Internal(id)) => return Some(RefTarget::Internal(id.clone())),
                Some(Explicit::Alias(next)) => name = next,
                None => return self.implicit.get(name).cloned().map(RefTarget::Internal),
            }
        }
        None
    }
}

/// Resolve named references against explicit and implicit targets.
///
/// Unknown names become problematic text and raise an error message.
pub fn resolve_references(document: &mut Document) {
    let targets = Targets::collect(document);
    let mut unknown = Vec::new();

    let mut resolve = |inlines: &mut Vec<Inline>| {
        for inline in inlines.iter_mut() {
            let Inline::Reference(reference) = inline else {
                continue;
            };
            let RefTarget::Name(name) = &reference.target else {
                continue;
            };
            match targets.lookup(name) {
                Some(target) => reference.target = target,
                None => {
                    unknown.push(name.clone());
                    *inline = Inline::Problematic(reference.text.clone());
                }
            }
        }
    };

    for title in [&mut document.title, &mut document.subtitle]
        .into_iter()
        .flatten()
    {
        resolve(&mut title.inlines);
    }
    for node in &mut document.children {
        visit_inlines(node, &mut resolve);
    }

    for name in unknown {
        tracing::debug!(name = %name, "Unknown reference target");
        let message = SystemMessage::error(0, format!("Unknown target name: \"{name}\"."));
        document.children.push(Node::SystemMessage(message.clone()));
        document.messages.push(message);
    }
}

/// Call `f` on each list of child nodes directly owned by `node`.
fn for_each_child_list(node: &Node, f: &mut impl FnMut(&[Node])) {
    match node {
        Node::Section(section) => f(&section.children),
        Node::BlockQuote(children) => f(children),
        Node::Admonition(admonition) => f(&admonition.children),
        Node::BulletList(items) => items.iter().for_each(|item| f(item)),
        Node::EnumeratedList(list) => list.items.iter().for_each(|item| f(item)),
        Node::DefinitionList(items) => items.iter().for_each(|item| f(&item.definition)),
        _ => {}
    }
}

/// Call `f` on every inline list in `node` and its descendants.
fn visit_inlines(node: &mut Node, f: &mut impl FnMut(&mut Vec<Inline>)) {
    let children: &mut [Node] = match node {
        Node::Paragraph(inlines) => {
            f(inlines);
            return;
        }
        Node::Section(section) => {
            f(&mut section.title);
            &mut section.children
        }
        Node::BlockQuote(children) => children,
        Node::Admonition(admonition) => &mut admonition.children,
        Node::BulletList(items) => {
            for item in items {
                for child in item {
                    visit_inlines(child, f);
                }
            }
            return;
        }
        Node::EnumeratedList(list) => {
            for item in &mut list.items {
                for child in item {
                    visit_inlines(child, f);
                }
            }
            return;
        }
        Node::DefinitionList(items) => {
            for item in items {
                f(&mut item.term);
                for child in &mut item.definition {
                    visit_inlines(child, f);
                }
            }
            return;
        }
        _ => return,
    };
    for child in children {
        visit_inlines(child, f);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directive::DirectiveRegistry;
    use crate::nodes::{Level, Reference};
    use crate::parser::parse;
    use pretty_assertions::assert_eq;

    fn transformed(source: &str, doctitle: bool) -> Document {
        let mut document = parse(source, &DirectiveRegistry::new());
        apply(&mut document, doctitle);
        document
    }

    fn section_ids(nodes: &[Node], out: &mut Vec<String>) {
        for node in nodes {
            if let Node::Section(section) = node {
                out.push(section.id.clone());
                section_ids(&section.children, out);
            }
        }
    }

    #[test]
    fn test_title_and_subtitle_promotion() {
        let doc = transformed("Title\n=====\n\nSub\n---\n\nBody.\n", true);
        assert_eq!(doc.title_text().as_deref(), Some("Title"));
        assert_eq!(
            doc.subtitle.as_ref().map(|t| plain_text(&t.inlines)).as_deref(),
            Some("Sub")
        );
        assert_eq!(doc.children, vec![Node::Paragraph(vec![Inline::text("Body.")])]);
        assert_eq!(doc.title.as_ref().map(|t| t.id.as_str()), Some("title"));
    }

    #[test]
    fn test_no_promotion_with_leading_paragraph() {
        let doc = transformed("Intro.\n\nTitle\n=====\n\nBody.\n", true);
        assert!(doc.title.is_none());
    }

    #[test]
    fn test_no_promotion_with_two_sections() {
        let doc = transformed("One\n===\n\nA.\n\nTwo\n===\n\nB.\n", true);
        assert!(doc.title.is_none());
        assert_eq!(doc.children.len(), 2);
    }

    #[test]
    fn test_promotion_disabled() {
        let doc = transformed("Title\n=====\n\nBody.\n", false);
        assert!(doc.title.is_none());
        assert!(matches!(doc.children[0], Node::Section(_)));
    }

    #[test]
    fn test_unique_section_ids() {
        let doc = transformed(
            "Intro.\n\nUsage\n=====\n\nUsage\n=====\n\nПривет\n======\n\nUsage\n=====\n",
            true,
        );
        let mut ids = Vec::new();
        section_ids(&doc.children, &mut ids);
        assert_eq!(ids, vec!["usage", "usage-1", "section", "usage-2"]);
    }

    #[test]
    fn test_resolve_explicit_and_implicit_targets() {
        let doc = transformed(
            "Intro `Install Steps`_ and Python_.\n\n.. _Python: https://python.org/\n\nInstall Steps\n=============\n\nText.\n",
            true,
        );
        let Node::Paragraph(inlines) = &doc.children[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(
            inlines[1],
            Inline::Reference(Reference {
                text: "Install Steps".to_owned(),
                target: RefTarget::Internal("install-steps".to_owned()),
            })
        );
        assert_eq!(
            inlines[3],
            Inline::Reference(Reference {
                text: "Python".to_owned(),
                target: RefTarget::Uri("https://python.org/".to_owned()),
            })
        );
        assert!(doc.messages.is_empty());
    }

    #[test]
    fn test_indirect_target() {
        let doc = transformed(
            "See docs_.\n\n.. _docs: python_\n.. _python: https://python.org/\n",
            true,
        );
        let Node::Paragraph(inlines) = &doc.children[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(
            inlines[1],
            Inline::Reference(Reference {
                text: "docs".to_owned(),
                target: RefTarget::Uri("https://python.org/".to_owned()),
            })
        );
    }

    #[test]
    fn test_unknown_target_is_problematic() {
        let doc = transformed("Broken missing_ link.\n", true);
        let Node::Paragraph(inlines) = &doc.children[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(inlines[1], Inline::Problematic("missing".to_owned()));
        assert_eq!(doc.messages.len(), 1);
        assert_eq!(doc.messages[0].level, Level::Error);
        assert_eq!(doc.messages[0].message, "Unknown target name: \"missing\".");
        assert!(matches!(doc.children.last(), Some(Node::SystemMessage(_))));
    }
}
