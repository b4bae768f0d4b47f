use crate::shared::api::{ApiClient, ApiError, HttpMethod, HttpTransport, MultipartForm, UploadFile};
use crate::shared::components::{ErrorBanner, FieldError, FilePicker};
use crate::shared::form_status::FormStatus;
use crate::shared::icons::icon;
use crate::system::auth::context::use_session;
use contracts::domain::a010_testimonial::aggregate::{Testimonial, TestimonialForm, RATING_RANGE};
use contracts::domain::common::EntityId;
use contracts::shared::media::ImageSlot;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Создание (`POST testimonials`) или изменение (`PUT testimonials/:id`), multipart
pub async fn save_testimonial<T: HttpTransport>(
    api: &ApiClient<T>,
    form: &TestimonialForm,
    image: Option<UploadFile>,
) -> Result<(), ApiError> {
    let payload = form.validate()?;
    let mut multipart = MultipartForm::new();
    multipart.extend_text(payload.text_fields());
    if let (Some(ImageSlot::Pending(_)), Some(file)) = (&form.image, image) {
        multipart.push_file("image", file);
    }

    let (method, path) = match &form.id {
        Some(id) => (HttpMethod::Put, format!("testimonials/{}", id)),
        None => (HttpMethod::Post, "testimonials".to_string()),
    };
    api.send_multipart(method, &path, multipart).await?;
    Ok(())
}

#[component]
fn RatingPicker(rating: RwSignal<u8>) -> impl IntoView {
    view! {
        <div class="rating-picker">
            {RATING_RANGE.map(|value| view! {
                <button
                    type="button"
                    class={move || if rating.get() >= value { "rating-picker__star rating-picker__star--on" } else { "rating-picker__star" }}
                    title=value.to_string()
                    on:click=move |_| rating.set(value)
                >
                    {icon("star")}
                </button>
            }).collect_view()}
        </div>
    }
}

#[component]
#[allow(non_snake_case)]
pub fn TestimonialDetails(
    testimonial: Option<Testimonial>,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let session = use_session();
    let initial = testimonial
        .as_ref()
        .map(TestimonialForm::from_testimonial)
        .unwrap_or_default();

    let id = StoredValue::new(initial.id.clone());
    let customer_name = RwSignal::new(initial.customer_name);
    let message = RwSignal::new(initial.message);
    let rating = RwSignal::new(initial.rating);
    let is_active = RwSignal::new(initial.is_active);
    let image = RwSignal::new(initial.image);
    let file = RwSignal::new_local(None::<UploadFile>);
    let status = FormStatus::new();

    let handle_save = move |_| {
        let form = TestimonialForm {
            id: id.get_value(),
            customer_name: customer_name.get_untracked(),
            message: message.get_untracked(),
            rating: rating.get_untracked(),
            is_active: is_active.get_untracked(),
            image: image.get_untracked(),
        };
        let upload = file.get_untracked();
        status.begin();
        spawn_local(async move {
            match save_testimonial(&session.client(), &form, upload).await {
                Ok(()) => {
                    status.finish();
                    on_saved.run(());
                }
                Err(e) => status.fail(session, "testimonial save", e),
            }
        });
    };

    let title = if id.with_value(Option::is_some) { "Отзыв" } else { "Новый отзыв" };

    view! {
        <div class="details-form">
            <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                <h2 class="details-form__title">{title}</h2>
                <Space>
                    <Button appearance=ButtonAppearance::Primary disabled=status.busy on_click=handle_save>
                        {icon("save")}
                        " Сохранить"
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_cancel.run(())>
                        {icon("close")}
                        " Закрыть"
                    </Button>
                </Space>
            </Flex>

            <ErrorBanner error=status.error />

            <div class="form__group">
                <label class="form__label">"Покупатель"</label>
                <Input value=customer_name />
                <FieldError message=status.field("customerName") />
            </div>
            <div class="form__group">
                <label class="form__label">"Текст"</label>
                <Textarea value=message attr:rows=4 />
                <FieldError message=status.field("message") />
            </div>
            <div class="form__group">
                <label class="form__label">"Оценка"</label>
                <RatingPicker rating=rating />
                <FieldError message=status.field("rating") />
            </div>
            <div class="form__group">
                <label class="form__label">"Фото"</label>
                {move || image.get().map(|slot| match slot {
                    ImageSlot::Existing(url) => view! { <img class="image-slot__img" src=url alt="" /> }.into_any(),
                    ImageSlot::Pending(name) => view! { <span class="image-slot__pending">{name}</span> }.into_any(),
                })}
                <FilePicker
                    label="Выбрать фото"
                    accept="image/png,image/jpeg"
                    on_pick=Callback::new(move |files: Vec<UploadFile>| {
                        if let Some(f) = files.into_iter().next() {
                            image.set(Some(ImageSlot::Pending(f.file_name.clone())));
                            file.set(Some(f));
                        }
                    })
                />
            </div>
            <Checkbox checked=is_active label="Показывать на сайте" />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::api::mock::MockTransport;
    use crate::shared::api::RequestBody;
    use futures::executor::block_on;

    fn form() -> TestimonialForm {
        TestimonialForm {
            customer_name: "Anna".into(),
            message: "Lovely".into(),
            rating: 4,
            image: Some(ImageSlot::Pending("me.jpg".into())),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_multipart_with_photo() {
        let api = MockTransport::new().client();
        let photo = UploadFile::from_bytes("me.jpg", "image/jpeg", vec![1]);
        block_on(save_testimonial(&api, &form(), Some(photo))).unwrap();

        let calls = api.transport().requests();
        assert_eq!(calls[0].method, HttpMethod::Post);
        assert_eq!(calls[0].path, "testimonials");
        let RequestBody::Multipart(body) = &calls[0].body else {
            panic!("expected multipart body");
        };
        assert_eq!(body.text_value("rating"), Some("4"));
        assert_eq!(body.file_names(), vec!["image"]);
    }

    #[test]
    fn test_update_keeps_existing_photo() {
        let api = MockTransport::new().client();
        let mut f = form();
        f.id = Some(EntityId::from("t1"));
        f.image = Some(ImageSlot::Existing("https://cdn/me.jpg".into()));
        block_on(save_testimonial(&api, &f, None)).unwrap();

        let calls = api.transport().requests();
        assert_eq!(calls[0].method, HttpMethod::Put);
        assert_eq!(calls[0].path, "testimonials/t1");
        let RequestBody::Multipart(body) = &calls[0].body else {
            panic!("expected multipart body");
        };
        assert_eq!(body.text_value("existingImage"), Some("https://cdn/me.jpg"));
        assert!(body.file_names().is_empty());
    }
}
