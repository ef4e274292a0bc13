use tmplc_ast::{FileNode, IdGenerator};

use super::{FilePass, PassKind};
use crate::{CompileErrorReporter, Diagnostic};

/// Requires every stateful template to be in strict HTML mode.
#[derive(Debug, Default)]
pub struct StatefulTemplates;

impl FilePass for StatefulTemplates {
    fn name(&self) -> &'static str {
        "stateful-templates"
    }

    fn kind(&self) -> PassKind {
        PassKind::Validating
    }

    fn run(
        &self,
        file: &mut FileNode<'_>,
        _ids: &mut dyn IdGenerator,
        reporter: &mut CompileErrorReporter,
    ) {
        for template in file.templates() {
            if !template.is_stateful() {
                continue;
            }
            if !template.is_strict_html() {
                reporter.report(Diagnostic::StatefulTemplateNotStrictHtml(template.span()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use similar_asserts::assert_eq;
    use tmplc_ast::{FileId, IncrementingIdGenerator, Span, TemplateFlags};

    use super::*;

    const STATEFUL: TemplateFlags = TemplateFlags::STATEFUL;
    const STRICT: TemplateFlags = TemplateFlags::STRICT_HTML;
    const NEITHER: TemplateFlags = TemplateFlags::empty();

    fn check(flags: &[TemplateFlags]) -> (Vec<Span>, Vec<Diagnostic>) {
        let file = FileId::from_i32(0);
        let mut ids = IncrementingIdGenerator::new();
        let mut node = FileNode::new(file, &mut ids);

        let spans = flags
            .iter()
            .enumerate()
            .map(|(i, &flags)| {
                let span = Span::new(i as u32 * 10, i as u32 * 10 + 8, file);
                node.add_template("tmpl", flags, span, &mut ids);
                span
            })
            .collect();

        let mut reporter = CompileErrorReporter::default();
        StatefulTemplates.run(&mut node, &mut ids, &mut reporter);
        (spans, reporter.into_reported())
    }

    #[test]
    fn empty_file() {
        let (_, reported) = check(&[]);
        assert!(reported.is_empty());
    }

    #[test]
    fn non_stateful_non_strict() {
        let (_, reported) = check(&[NEITHER]);
        assert!(reported.is_empty());
    }

    #[test]
    fn stateful_strict() {
        let (_, reported) = check(&[STATEFUL | STRICT]);
        assert!(reported.is_empty());
    }

    #[test]
    fn stateful_non_strict() {
        let (spans, reported) = check(&[STATEFUL]);
        assert_eq!(reported, vec![Diagnostic::StatefulTemplateNotStrictHtml(spans[0])]);
        assert_eq!(
            reported[0].to_string(),
            "Stateful templates cannot be of type stricthtml=\"false\"."
        );
    }

    #[test]
    fn every_violation_is_reported_in_order() {
        let (spans, reported) = check(&[STATEFUL, NEITHER, STATEFUL]);
        assert_eq!(
            reported,
            vec![
                Diagnostic::StatefulTemplateNotStrictHtml(spans[0]),
                Diagnostic::StatefulTemplateNotStrictHtml(spans[2]),
            ]
        );
    }

    #[test]
    fn strictness_of_non_stateful_templates_is_irrelevant() {
        let (_, lenient) = check(&[NEITHER, NEITHER, STATEFUL]);
        let (_, strict) = check(&[STRICT, STRICT, STATEFUL]);
        assert_eq!(lenient, strict);
    }

    #[test]
    fn running_twice_reports_twice() {
        let file = FileId::from_i32(0);
        let mut ids = IncrementingIdGenerator::new();
        let mut node = FileNode::new(file, &mut ids);
        let span = Span::new(0, 4, file);
        node.add_template("tmpl", STATEFUL, span, &mut ids);

        let mut reporter = CompileErrorReporter::default();
        StatefulTemplates.run(&mut node, &mut ids, &mut reporter);
        StatefulTemplates.run(&mut node, &mut ids, &mut reporter);

        assert_eq!(
            reporter.into_reported(),
            vec![Diagnostic::StatefulTemplateNotStrictHtml(span); 2]
        );
    }
}
