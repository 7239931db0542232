use tc_typeck::{RegisteredType, TypeRegistry};

/// One line per registered annotation tag.
pub fn describe_registry(registry: &TypeRegistry) -> Vec<String> {
    registry
        .iter()
        .map(|(tag, ty)| match ty {
            RegisteredType::Primitive { display, accepts } => {
                let accepts = format!("{accepts:?}").to_lowercase();
                format!("{tag:<24} {display} (accepts {accepts} literals)")
            }
            RegisteredType::Structural => format!("{tag:<24} interface reference"),
        })
        .collect()
}

pub fn print_registry(registry: &TypeRegistry) {
    for line in describe_registry(registry) {
        println!("{line}");
    }
}
