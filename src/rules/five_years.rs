//! 5 岁班规则表
//!
//! 上游标签在这个年级混用了旧版和新版的领域名，分类完全按白名单进行；
//! 组内顺序按这里的列表，与 display_order 无关。

use super::SummaryTable;
use crate::models::Destination;
use crate::services::classifier::AllowListBucket;
use crate::services::paginator::{LayoutPolicy, PlacementRule};
use phf::phf_map;

pub static ALLOW_LIST: &[AllowListBucket] = &[
    AllowListBucket {
        label: "Personal Social",
        entries: &[
            "Se reconoce como persona única con características propias",
            "Expresa sus emociones y explica sus causas",
            "Busca la compañía de un adulto cuando se siente vulnerable",
            "Participa en la construcción colectiva de acuerdos y normas",
            "Realiza acciones cotidianas de cuidado personal con autonomía",
            "Se relaciona con adultos y niños de su entorno en diferentes actividades",
            "Expresa por propia iniciativa el amor y cuidado que recibe de su entorno",
            "Participa en prácticas de la confesión religiosa de sus padres",
            "Comparte sus juguetes y materiales con sus compañeros",
            "Respeta los turnos y espera su momento para participar",
        ],
    },
    AllowListBucket {
        label: "Psicomotriz",
        entries: &[
            "Realiza acciones y juegos de manera autónoma combinando habilidades motrices",
            "Corre, salta y trepa con coordinación y equilibrio",
            "Reconoce sus sensaciones corporales e identifica las necesidades de su cuerpo",
            "Realiza acciones y movimientos de coordinación óculo-manual y óculo-podal",
            "Representa su cuerpo a través del dibujo y el modelado",
            "Se orienta en el espacio en relación a sí mismo y a los objetos",
            "Utiliza la pinza digital para rasgar, recortar y pegar",
            "Lanza y atrapa la pelota con ambas manos",
        ],
    },
    AllowListBucket {
        label: "Comunicación",
        entries: &[
            "Expresa sus necesidades, emociones, intereses y da cuenta de sus experiencias",
            "Participa en conversaciones, diálogos o escucha cuentos y leyendas",
            "Recupera información explícita de un texto oral",
            "Identifica características de personas, personajes, animales u objetos en textos que le leen",
            "Dice de qué tratará un texto a partir de algunos indicios",
            "Escribe por propia iniciativa a su manera",
            "Revisa el escrito que ha dictado en función de lo que quiere comunicar",
            "Representa ideas acerca de sus vivencias personales usando diferentes lenguajes artísticos",
            "Explora por iniciativa propia diversos materiales de acuerdo con sus necesidades e intereses",
            "Muestra sus creaciones y las comenta a sus compañeros",
        ],
    },
    AllowListBucket {
        label: "Matemática",
        entries: &[
            "Establece relaciones entre los objetos de su entorno según sus características perceptuales al comparar y agrupar",
            "Realiza seriaciones por tamaño, longitud y grosor hasta con cinco objetos",
            "Establece correspondencia uno a uno en situaciones cotidianas",
            "Usa diversas expresiones que muestran su comprensión sobre la cantidad, el peso y el tiempo",
            "Utiliza el conteo hasta 10 en situaciones cotidianas",
            "Establece relaciones de medida en situaciones cotidianas",
            "Se ubica a sí mismo y ubica objetos en el espacio en el que se encuentra",
            "Expresa con material concreto y dibujos sus vivencias en los que muestra relaciones espaciales",
            "Prueba diferentes formas de resolver una determinada situación relacionada con la ubicación",
        ],
    },
    AllowListBucket {
        label: "Ciencia y Tecnología",
        entries: &[
            "Hace preguntas que expresan su curiosidad sobre los objetos, seres vivos y hechos de su entorno",
            "Propone acciones y el uso de materiales e instrumentos para buscar información",
            "Obtiene información sobre las características de los objetos y materiales que explora",
            "Compara sus explicaciones y predicciones con los datos e información que ha obtenido",
            "Comunica los descubrimientos que hace cuando explora",
            "Cuida las plantas y animales de su entorno",
        ],
    },
];

pub static SUMMARIES: SummaryTable = phf_map! {
    "Establece relaciones entre los objetos de su entorno según sus características perceptuales al comparar y agrupar"
        => "Compara y agrupa objetos según sus características",
    "Usa diversas expresiones que muestran su comprensión sobre la cantidad, el peso y el tiempo"
        => "Usa expresiones de cantidad, peso y tiempo",
    "Expresa con material concreto y dibujos sus vivencias en los que muestra relaciones espaciales"
        => "Representa relaciones espaciales con material concreto",
    "Identifica características de personas, personajes, animales u objetos en textos que le leen"
        => "Identifica características en textos que le leen",
    "Hace preguntas que expresan su curiosidad sobre los objetos, seres vivos y hechos de su entorno"
        => "Hace preguntas sobre su entorno",
    "Explora por iniciativa propia diversos materiales de acuerdo con sus necesidades e intereses"
        => "Explora diversos materiales por iniciativa propia",
};

/// 左栏：Personal Social + Psicomotriz 前 6 条；Matemática 最后 5 条移到续页
pub fn layout() -> LayoutPolicy {
    use Destination::{Continuation, Left, Right};

    LayoutPolicy::new(vec![
        PlacementRule::whole("Personal Social", Left),
        PlacementRule::head("Psicomotriz", 6, Left, Right),
        PlacementRule::whole("Comunicación", Right),
        PlacementRule::last("Matemática", 5, Right, Continuation),
        PlacementRule::whole("Ciencia y Tecnología", Continuation),
    ])
}
