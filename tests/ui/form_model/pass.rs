use arbe::form::{FieldKey, FieldLens, FormModel};

#[derive(Clone, arbe::form::FormModel)]
struct QuoteRequest {
    name: String,
    email: String,
}

fn main() {
    let fields = QuoteRequest::fields();
    let lens = fields.email();
    let mut model = QuoteRequest {
        name: "Sara".to_string(),
        email: "sara@arbe.ir".to_string(),
    };
    lens.set(&mut model, "studio@arbe.ir".to_string());
    assert_eq!(lens.key().as_str(), "email");
    assert_eq!(lens.get(&model), "studio@arbe.ir");
    assert_eq!(
        model.field_values(),
        vec![
            (FieldKey::new("name"), "Sara".to_string()),
            (FieldKey::new("email"), "studio@arbe.ir".to_string()),
        ]
    );
}
