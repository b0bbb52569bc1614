use winnow::ascii::space1;
use winnow::combinator::{cut_err, preceded};
use winnow::error::{ModalResult, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::{take_till, take_while};

// -- Definition lines -------------------------------------------------------

fn name<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_till(1.., |c: char| c.is_whitespace())
        .context(StrContext::Label("name"))
        .parse_next(input)
}

fn means(input: &mut &str) -> ModalResult<()> {
    cut_err((space1, "means").void())
        .context(StrContext::Expected(StrContextValue::StringLiteral(
            "means",
        )))
        .parse_next(input)
}

fn body<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    cut_err(preceded(space1, take_while(1.., |_: char| true)))
        .context(StrContext::Expected(StrContextValue::Description(
            "rule text",
        )))
        .parse_next(input)
}

/// `<name> means <rule text>`, on a line with surrounding blanks removed.
pub fn definition<'i>(input: &mut &'i str) -> ModalResult<(&'i str, &'i str)> {
    let name = name.parse_next(input)?;
    means.parse_next(input)?;
    let body = body.parse_next(input)?;
    Ok((name, body))
}
