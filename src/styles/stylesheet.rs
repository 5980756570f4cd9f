use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};

use crate::prompt::PromptState;

use super::computed::ComputedStyle;
use super::parser::{parse_declarations, strip_comments};
use super::query::StyleQuery;

#[derive(Clone, Debug, Default)]
pub struct Stylesheet {
    root: HashMap<String, String>,
    rules: Vec<StyleRule>,
}

impl Stylesheet {
    pub fn parse(input: &str) -> Result<Self> {
        let mut sheet = Stylesheet::default();
        let mut order = 0usize;
        let cleaned = strip_comments(input);
        for block in cleaned.split('}') {
            if block.trim().is_empty() {
                continue;
            }
            let (selector_raw, body_raw) = match block.split_once('{') {
                Some(pair) => pair,
                None => bail!("declaration block without selector: {}", block.trim()),
            };
            let selector_raw = selector_raw.trim();
            if selector_raw.is_empty() {
                bail!("empty selector");
            }
            let declarations = parse_declarations(body_raw);
            for selector in selector_raw.split(',') {
                let selector = selector.trim();
                if selector == ":root" {
                    merge_maps(&mut sheet.root, &declarations);
                    continue;
                }
                let selector = Selector::parse(selector)
                    .with_context(|| format!("invalid selector `{selector}`"))?;
                sheet.rules.push(StyleRule {
                    selector,
                    declarations: declarations.clone(),
                    order,
                });
                order += 1;
            }
        }
        Ok(sheet)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("read stylesheet {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("parse stylesheet {}", path.display()))
    }

    pub fn root(&self) -> ComputedStyle {
        ComputedStyle::from_props(self.root.clone())
    }

    pub fn query<'a>(&'a self, query: StyleQuery<'a>) -> ComputedStyle {
        let mut props = self.root.clone();
        let mut matches: Vec<&StyleRule> = self
            .rules
            .iter()
            .filter(|rule| rule.selector.matches(&query))
            .collect();
        matches.sort_by(|a, b| {
            a.selector
                .specificity()
                .cmp(&b.selector.specificity())
                .then(a.order.cmp(&b.order))
        });
        for rule in matches {
            merge_maps(&mut props, &rule.declarations);
        }
        ComputedStyle::from_props(props)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty() && self.rules.is_empty()
    }
}

#[derive(Clone, Debug)]
struct StyleRule {
    selector: Selector,
    declarations: HashMap<String, String>,
    order: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PseudoClass {
    Focused,
    Floating,
    Normal,
}

impl PseudoClass {
    fn parse(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "focused" | "focus" => Ok(Self::Focused),
            "floating" => Ok(Self::Floating),
            "normal" => Ok(Self::Normal),
            other => Err(anyhow!("unknown pseudo-class :{other}")),
        }
    }

    fn matches(self, query: &StyleQuery<'_>) -> bool {
        match self {
            Self::Focused => query.focused,
            Self::Floating => query.prompt == Some(PromptState::Floating),
            Self::Normal => query.prompt == Some(PromptState::Normal),
        }
    }
}

#[derive(Clone, Debug, Default)]
struct Selector {
    element: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    pseudo: Vec<PseudoClass>,
}

#[derive(Clone, Copy)]
enum SegmentTarget {
    Element,
    Id,
    Class,
    Pseudo,
}

impl Selector {
    fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            bail!("empty selector");
        }
        if trimmed.contains(char::is_whitespace) {
            bail!("descendant selectors are not supported");
        }
        let mut selector = Selector::default();
        let mut current = String::new();
        let mut mode = SegmentTarget::Element;
        for ch in trimmed.chars() {
            let next = match ch {
                '#' => SegmentTarget::Id,
                '.' => SegmentTarget::Class,
                ':' => SegmentTarget::Pseudo,
                _ => {
                    current.push(ch);
                    continue;
                }
            };
            selector.push_segment(&mut current, mode)?;
            mode = next;
        }
        selector.push_segment(&mut current, mode)?;
        Ok(selector)
    }

    fn push_segment(&mut self, buffer: &mut String, mode: SegmentTarget) -> Result<()> {
        let value = buffer.trim().to_string();
        buffer.clear();
        if value.is_empty() {
            return match mode {
                SegmentTarget::Element => Ok(()),
                _ => Err(anyhow!("selector segment is empty")),
            };
        }
        match mode {
            SegmentTarget::Element => {
                self.element = Some(value.to_ascii_lowercase());
            }
            SegmentTarget::Id => {
                if self.id.is_some() {
                    bail!("selector already has id");
                }
                self.id = Some(value);
            }
            SegmentTarget::Class => {
                let class = value.to_ascii_lowercase();
                if self.classes.contains(&class) {
                    bail!("selector already has class {class}");
                }
                self.classes.push(class);
            }
            SegmentTarget::Pseudo => {
                let pseudo = PseudoClass::parse(&value)?;
                if !self.pseudo.contains(&pseudo) {
                    self.pseudo.push(pseudo);
                }
            }
        }
        Ok(())
    }

    fn matches(&self, query: &StyleQuery<'_>) -> bool {
        if let Some(element) = self.element.as_ref() {
            if !element.eq_ignore_ascii_case(query.element) {
                return false;
            }
        }
        if let Some(id) = self.id.as_ref() {
            if query.id != Some(id.as_str()) {
                return false;
            }
        }
        let has_classes = self.classes.iter().all(|class| {
            query
                .classes
                .iter()
                .any(|candidate| candidate.eq_ignore_ascii_case(class))
        });
        has_classes && self.pseudo.iter().all(|pseudo| pseudo.matches(query))
    }

    fn specificity(&self) -> (usize, usize, usize) {
        (
            usize::from(self.id.is_some()),
            self.classes.len() + self.pseudo.len(),
            usize::from(self.element.is_some()),
        )
    }
}

fn merge_maps(into: &mut HashMap<String, String>, from: &HashMap<String, String>) {
    for (key, value) in from {
        into.insert(key.to_ascii_lowercase(), value.clone());
    }
}
