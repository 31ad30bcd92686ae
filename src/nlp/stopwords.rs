//! Portuguese stopword set.

use std::collections::HashSet;

use once_cell::sync::Lazy;

static PORTUGUESE: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "à", "ao", "aos", "aquela", "aquelas", "aquele", "aqueles", "aquilo", "as", "às",
        "até", "com", "como", "da", "das", "de", "dela", "delas", "dele", "deles", "depois",
        "do", "dos", "e", "é", "ela", "elas", "ele", "eles", "em", "entre", "era", "eram",
        "éramos", "essa", "essas", "esse", "esses", "esta", "está", "estamos", "estão", "estar",
        "estas", "estava", "estavam", "estávamos", "este", "esteja", "estejam", "estes", "esteve",
        "estive", "estivemos", "estiver", "estivera", "estiveram", "estiverem", "estivesse",
        "estivessem", "estou", "eu", "foi", "fomos", "for", "fora", "foram", "forem", "fosse",
        "fossem", "fui", "há", "haja", "hajam", "havemos", "haver", "hei", "houve", "houver",
        "houvera", "houveram", "houverá", "houverão", "houveria", "houveriam", "houvesse",
        "houvessem", "isso", "isto", "já", "lhe", "lhes", "mais", "mas", "me", "mesmo", "meu",
        "meus", "minha", "minhas", "muito", "na", "não", "nas", "nem", "no", "nos", "nós",
        "nossa", "nossas", "nosso", "nossos", "num", "numa", "o", "os", "ou", "para", "pela",
        "pelas", "pelo", "pelos", "por", "qual", "quando", "que", "quem", "são", "se", "seja",
        "sejam", "sem", "será", "serão", "seria", "seriam", "seu", "seus", "só", "somos", "sou",
        "sua", "suas", "também", "te", "tem", "têm", "temos", "tenho", "ter", "teu", "teus",
        "teve", "tinha", "tinham", "tive", "tivemos", "tiver", "tiveram", "tivesse", "tu", "tua",
        "tuas", "um", "uma", "umas", "uns", "você", "vocês", "vos", "sobre", "cada", "onde",
        "ainda", "assim", "bem", "forma", "outro", "outra", "outros", "outras", "partir",
        "pode", "podem", "ser", "sendo", "sido", "todo", "toda", "todos", "todas", "tal",
        "tais", "vez", "vezes", "através", "desta", "deste", "dessa", "desse", "neste", "nesta",
        "nesse", "nessa", "sob", "após", "contra", "durante", "segundo", "conforme",
    ]
    .into_iter()
    .collect()
});

/// Case-insensitive membership test.
pub fn is_stopword(word: &str) -> bool {
    let lower = word.to_lowercase();
    PORTUGUESE.contains(lower.as_str())
}
