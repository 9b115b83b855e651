//! Source recovery for callables
//!
//! Parses the file a callable was captured in and slices out the text of
//! the matching `fn` declaration. Lookup is best effort; any failure is
//! reported as `None` and the caller falls back to the signature.

use std::path::Path;

use proc_macro2::{Delimiter, LineColumn, TokenStream, TokenTree};
use quote::ToTokens;
use syn::{Block, ExprPath, Ident, ImplItem, Item, ItemImpl, Signature, TraitItem, Type, Visibility};

/// Find the declaration that `path` names inside `file`
pub(crate) fn find_function_source(file: &Path, path: &str) -> Option<String> {
    let target = FunctionPath::parse(path)?;

    let source = match std::fs::read_to_string(file) {
        Ok(source) => source,
        Err(err) => {
            log::trace!("Cannot read {}: {}", file.display(), err);
            return None;
        }
    };
    let syntax = match syn::parse_file(&source) {
        Ok(syntax) => syntax,
        Err(err) => {
            log::trace!("Cannot parse {}: {}", file.display(), err);
            return None;
        }
    };

    let mut items = Vec::new();
    flatten(&syntax.items, None, &mut items);

    let Some((start, end)) = target.locate(&items) else {
        log::trace!("No declaration for '{}' in {}", path, file.display());
        return None;
    };
    slice(&source, start, end)
}

/// What a callable path refers to
#[derive(Debug, PartialEq)]
enum Owner {
    /// `name`
    Free,
    /// `Owner::name`: a module, a type or a trait
    Named(String),
    /// `<SelfTy as Trait>::name`
    Qualified { self_ty: String, trait_name: String },
}

#[derive(Debug)]
struct FunctionPath {
    name: String,
    owner: Owner,
}

impl FunctionPath {
    /// Parse the expression text recorded at capture time. Anything that
    /// is not a plain path (closures, method calls) yields `None`.
    fn parse(path: &str) -> Option<Self> {
        let expr: ExprPath = syn::parse_str(path).ok()?;
        let segments: Vec<String> = expr
            .path
            .segments
            .iter()
            .map(|segment| segment.ident.to_string())
            .collect();
        let name = segments.last()?.clone();

        let owner = match &expr.qself {
            Some(qself) => Owner::Qualified {
                self_ty: spelling(&qself.ty),
                trait_name: segments.get(qself.position.checked_sub(1)?)?.clone(),
            },
            None if segments.len() >= 2 => Owner::Named(segments[segments.len() - 2].clone()),
            None => Owner::Free,
        };
        Some(Self { name, owner })
    }

    fn locate(&self, items: &[(Option<&Ident>, &Item)]) -> Option<(LineColumn, LineColumn)> {
        match &self.owner {
            Owner::Free => self.free_fn(items, None),
            Owner::Named(owner) => self
                .free_fn(items, Some(owner.as_str()))
                .or_else(|| self.impl_fn(items, |imp| imp.trait_.is_none() && spelling(&imp.self_ty) == *owner))
                .or_else(|| self.impl_fn(items, |imp| imp.trait_.is_some() && spelling(&imp.self_ty) == *owner))
                .or_else(|| self.trait_default(items, owner)),
            Owner::Qualified { self_ty, trait_name } => self.impl_fn(items, |imp| {
                let implements = imp
                    .trait_
                    .as_ref()
                    .and_then(|(_, path, _)| path.segments.last())
                    .is_some_and(|segment| segment.ident == trait_name);
                implements && spelling(&imp.self_ty) == *self_ty
            }),
        }
    }

    fn free_fn(&self, items: &[(Option<&Ident>, &Item)], module: Option<&str>) -> Option<(LineColumn, LineColumn)> {
        items.iter().find_map(|(parent, item)| match item {
            Item::Fn(f) if f.sig.ident == self.name => {
                let in_module = match module {
                    Some(module) => parent.is_some_and(|parent| parent == module),
                    None => true,
                };
                in_module.then(|| span(&f.vis, &f.sig, &f.block)).flatten()
            }
            _ => None,
        })
    }

    fn impl_fn(
        &self,
        items: &[(Option<&Ident>, &Item)],
        accept: impl Fn(&ItemImpl) -> bool,
    ) -> Option<(LineColumn, LineColumn)> {
        items
            .iter()
            .filter_map(|(_, item)| match item {
                Item::Impl(imp) if accept(imp) => Some(imp),
                _ => None,
            })
            .flat_map(|imp| imp.items.iter())
            .find_map(|item| match item {
                ImplItem::Fn(f) if f.sig.ident == self.name => span(&f.vis, &f.sig, &f.block),
                _ => None,
            })
    }

    fn trait_default(&self, items: &[(Option<&Ident>, &Item)], owner: &str) -> Option<(LineColumn, LineColumn)> {
        items
            .iter()
            .filter_map(|(_, item)| match item {
                Item::Trait(t) if t.ident == owner => Some(t),
                _ => None,
            })
            .flat_map(|t| t.items.iter())
            .find_map(|item| match item {
                TraitItem::Fn(f) if f.sig.ident == self.name => {
                    let body = f.default.as_ref()?;
                    span(&Visibility::Inherited, &f.sig, body)
                }
                _ => None,
            })
    }
}

/// Collect items from the file and every inline module, tagging each with
/// the name of its enclosing module
fn flatten<'a>(items: &'a [Item], parent: Option<&'a Ident>, out: &mut Vec<(Option<&'a Ident>, &'a Item)>) {
    for item in items {
        out.push((parent, item));
        if let Item::Mod(module) = item {
            if let Some((_, content)) = &module.content {
                flatten(content, Some(&module.ident), out);
            }
        }
    }
}

/// Token text of a type without whitespace, so `& Rect` and `&Rect` compare equal
fn spelling(ty: &Type) -> String {
    ty.to_token_stream()
        .to_string()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// Readable spelling of a function type as written at the capture site:
/// `fn (& str , & [& str]) -> String` becomes `fn(&str, &[&str]) -> String`.
/// Text that does not parse as a type is only whitespace-collapsed.
pub(crate) fn signature_spelling(text: &str) -> String {
    match syn::parse_str::<Type>(text) {
        Ok(ty) => {
            let mut out = String::new();
            render_tokens(ty.to_token_stream(), &mut out);
            out
        }
        Err(_) => text.split_whitespace().collect::<Vec<_>>().join(" "),
    }
}

fn render_tokens(tokens: TokenStream, out: &mut String) {
    let mut after_word = false;
    for token in tokens {
        match token {
            TokenTree::Ident(ident) => {
                if after_word {
                    out.push(' ');
                }
                out.push_str(&ident.to_string());
                after_word = true;
            }
            TokenTree::Literal(literal) => {
                if after_word {
                    out.push(' ');
                }
                out.push_str(&literal.to_string());
                after_word = true;
            }
            TokenTree::Punct(punct) => {
                match punct.as_char() {
                    ',' => out.push_str(", "),
                    ';' => out.push_str("; "),
                    '+' | '=' => {
                        out.push(' ');
                        out.push(punct.as_char());
                        out.push(' ');
                    }
                    '-' => out.push_str(" -"),
                    '>' if out.ends_with(" -") => out.push_str("> "),
                    other => out.push(other),
                }
                after_word = false;
            }
            TokenTree::Group(group) => {
                let (open, close) = match group.delimiter() {
                    Delimiter::Parenthesis => ("(", ")"),
                    Delimiter::Bracket => ("[", "]"),
                    Delimiter::Brace => ("{", "}"),
                    Delimiter::None => ("", ""),
                };
                out.push_str(open);
                render_tokens(group.stream(), out);
                out.truncate(out.trim_end().len());
                out.push_str(close);
                after_word = group.delimiter() == Delimiter::None;
            }
        }
    }
}

/// From the first token of the visibility or signature to the closing brace
fn span(vis: &Visibility, sig: &Signature, body: &Block) -> Option<(LineColumn, LineColumn)> {
    let mut tokens = vis.to_token_stream();
    sig.to_tokens(&mut tokens);
    let start = tokens.into_iter().next()?.span().start();
    let end = body.brace_token.span.close().end();
    Some((start, end))
}

/// Cut `start..end` out of `source` and strip the declaration's own
/// indentation from the continuation lines. Lines are 1-based, columns are
/// 0-based character offsets.
fn slice(source: &str, start: LineColumn, end: LineColumn) -> Option<String> {
    let lines: Vec<&str> = source.lines().collect();
    let mut out = Vec::with_capacity(end.line.saturating_sub(start.line) + 1);

    for number in start.line..=end.line {
        let line = lines.get(number.checked_sub(1)?)?;
        let from = if number == start.line { start.column } else { 0 };
        let to = if number == end.line { end.column } else { line.chars().count() };
        let text: String = line.chars().skip(from).take(to.saturating_sub(from)).collect();

        if number == start.line {
            out.push(text);
        } else {
            out.push(dedent(&text, start.column).to_string());
        }
    }
    Some(out.join("\n"))
}

/// Remove up to `width` leading whitespace characters
fn dedent(line: &str, width: usize) -> &str {
    let cut = line
        .char_indices()
        .take(width)
        .take_while(|(_, c)| c.is_whitespace())
        .last()
        .map_or(0, |(i, c)| i + c.len_utf8());
    &line[cut..]
}
