use syn::{Field, LitStr, Result};

/// Parsed `#[input(...)]` attributes for a single struct field.
#[derive(Default)]
pub struct FieldAttrs {
    pub skip: bool,
    pub name: Option<LitStr>,
}

/// Parses all `#[input(...)]` attributes on a field.
pub fn parse_field_attrs(field: &Field) -> Result<FieldAttrs> {
    let mut attrs = FieldAttrs::default();

    for attr in field.attrs.iter().filter(|a| a.path().is_ident("input")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                attrs.skip = true;
                return Ok(());
            }

            if meta.path.is_ident("name") {
                let lit: LitStr = meta.value()?.parse()?;
                attrs.name = Some(lit);
                return Ok(());
            }

            Err(meta.error("unknown `input` attribute, expected `skip` or `name = \"...\"`"))
        })?;
    }

    if attrs.skip && attrs.name.is_some() {
        return Err(syn::Error::new_spanned(
            field,
            "`skip` and `name` cannot be combined on the same field",
        ));
    }

    Ok(attrs)
}
