use crate::xml::node::{XElement, XNode};

/// Descendant elements of `element` in document order, not descending below
/// any element matching `trim_predicate`. A matching element is itself
/// yielded; its subtree is not.
pub fn descendants_trimmed<'a, F>(element: &'a XElement, trim_predicate: F) -> DescendantsTrimmed<'a, F>
where
    F: Fn(&XElement) -> bool,
{
    DescendantsTrimmed {
        stack: vec![element.children.iter()],
        trim_predicate,
    }
}

pub struct DescendantsTrimmed<'a, F>
where
    F: Fn(&XElement) -> bool,
{
    stack: Vec<std::slice::Iter<'a, XNode>>,
    trim_predicate: F,
}

impl<'a, F> Iterator for DescendantsTrimmed<'a, F>
where
    F: Fn(&XElement) -> bool,
{
    type Item = &'a XElement;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let next = match self.stack.last_mut() {
                Some(top) => top.next(),
                None => return None,
            };
            match next {
                Some(XNode::Element(element)) => {
                    if !(self.trim_predicate)(element) {
                        self.stack.push(element.children.iter());
                    }
                    return Some(element);
                }
                Some(XNode::Text(_)) => continue,
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}
